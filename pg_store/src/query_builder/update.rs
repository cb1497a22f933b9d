use super::filter::{FieldMap, LogicalOperator};
use super::params::Params;
use super::sql_generation::SqlGenerator;
use super::statement::Statement;
use crate::errors::BuildError;

/// UPDATE of the rows matching equality conditions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    pub table: String,
    pub set: FieldMap,
    pub conditions: FieldMap,
    pub operator: LogicalOperator,
}

impl Update {
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Default::default()
        }
    }

    pub fn set(mut self, set: FieldMap) -> Self {
        self.set = set;
        self
    }

    pub fn filter(mut self, conditions: FieldMap) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn operator(mut self, operator: LogicalOperator) -> Self {
        self.operator = operator;
        self
    }

    /// `UPDATE t SET a = $1, b = $2 WHERE c = $3 <op> d = $4 RETURNING id`
    ///
    /// SET placeholders are numbered first; WHERE placeholders continue after them.
    pub fn build(&self) -> Result<Statement, BuildError> {
        if self.set.is_empty() {
            return Err(BuildError::EmptyValues);
        }
        if self.conditions.is_empty() {
            return Err(BuildError::EmptyConditions);
        }

        let mut params = Params::new();
        let set_clause = SqlGenerator::build_set_clause(&self.set, &mut params);
        let where_clause =
            SqlGenerator::build_where_clause(&self.conditions, self.operator, &mut params);

        let sql = format!(
            "UPDATE {} SET {}{} RETURNING id",
            self.table, set_clause, where_clause
        );

        Ok(Statement::query(sql, params))
    }
}
