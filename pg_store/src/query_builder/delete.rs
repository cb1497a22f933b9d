use super::filter::{FieldMap, LogicalOperator};
use super::params::Params;
use super::sql_generation::SqlGenerator;
use super::statement::Statement;

/// DELETE of the rows matching AND-joined equality conditions.
///
/// An empty condition map deletes every row of the table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Delete {
    pub table: String,
    pub conditions: FieldMap,
}

impl Delete {
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            conditions: FieldMap::new(),
        }
    }

    pub fn filter(mut self, conditions: FieldMap) -> Self {
        self.conditions = conditions;
        self
    }

    /// `DELETE FROM t [WHERE a = $1 AND b = $2] RETURNING id`
    pub fn build(&self) -> Statement {
        let mut params = Params::new();
        let where_clause =
            SqlGenerator::build_where_clause(&self.conditions, LogicalOperator::And, &mut params);

        let sql = format!("DELETE FROM {}{} RETURNING id", self.table, where_clause);

        Statement::query(sql, params)
    }
}
