use super::params::Params;
use type_mapping::BindValue;

/// A parameterized SQL statement ready for execution
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub text: String,
    pub params: Vec<BindValue>,
    /// Fetch returned rows (SELECT / RETURNING) rather than only the row count
    pub returns_rows: bool,
}

impl Statement {
    /// Statement whose rows are fetched
    pub fn query(text: impl Into<String>, params: Params) -> Self {
        Self {
            text: text.into(),
            params: params.into_values(),
            returns_rows: true,
        }
    }

    /// Statement executed for its affected-row count
    pub fn command(text: impl Into<String>, params: Params) -> Self {
        Self {
            text: text.into(),
            params: params.into_values(),
            returns_rows: false,
        }
    }

    /// Parameterless command (BEGIN, COMMIT, TRUNCATE ...)
    pub fn raw(text: impl Into<String>) -> Self {
        Self::command(text, Params::new())
    }
}
