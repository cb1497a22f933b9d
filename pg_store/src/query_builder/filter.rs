//! Query builder utilities
//!
//! Column/value maps, column selections and condition combinators.

use serde_json::Value;
use type_mapping::BindValue;

/// Logical operators for combining equality conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogicalOperator {
    #[default]
    And,
    Or,
}

impl LogicalOperator {
    pub fn to_sql(&self) -> &'static str {
        match self {
            LogicalOperator::And => " AND ",
            LogicalOperator::Or => " OR ",
        }
    }
}

/// Ordered column -> value map.
///
/// Keeps caller insertion order so generated SQL is deterministic; setting an
/// existing column replaces its value in place. Values keep the type they were
/// given: a `&str` is TEXT even when it looks like a UUID, a `uuid::Uuid` is UUID.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    entries: Vec<(String, BindValue)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set a column to a value
    pub fn set(mut self, column: impl Into<String>, value: impl Into<BindValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<BindValue>) {
        let column = column.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&BindValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BindValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<K, V> FromIterator<(K, V)> for FieldMap
where
    K: Into<String>,
    V: Into<BindValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (column, value) in iter {
            map.insert(column, value);
        }
        map
    }
}

impl From<serde_json::Map<String, Value>> for FieldMap {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

/// Columns to select
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Columns {
    #[default]
    All,
    List(Vec<String>),
}

impl Columns {
    pub fn list<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Columns::List(columns.into_iter().map(Into::into).collect())
    }

    /// An empty list selects everything
    pub fn is_all(&self) -> bool {
        match self {
            Columns::All => true,
            Columns::List(columns) => columns.is_empty(),
        }
    }

    pub fn to_sql(&self) -> String {
        match self {
            Columns::List(columns) if !columns.is_empty() => columns.join(", "),
            _ => "*".to_string(),
        }
    }
}
