use super::filter::{Columns, FieldMap, LogicalOperator};
use super::params::Params;
use super::sql_generation::SqlGenerator;
use super::statement::Statement;

/// SELECT with equality conditions joined by one combinator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Select {
    pub table: String,
    pub columns: Columns,
    pub conditions: FieldMap,
    pub operator: LogicalOperator,
}

impl Select {
    /// Select all columns of all rows of `table`
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Default::default()
        }
    }

    pub fn columns(mut self, columns: Columns) -> Self {
        self.columns = columns;
        self
    }

    /// Equality conditions; empty means no WHERE clause
    pub fn filter(mut self, conditions: FieldMap) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn operator(mut self, operator: LogicalOperator) -> Self {
        self.operator = operator;
        self
    }

    /// `SELECT cols FROM t [WHERE a = $1 <op> b = $2]`
    pub fn build(&self) -> Statement {
        let mut params = Params::new();
        let where_clause =
            SqlGenerator::build_where_clause(&self.conditions, self.operator, &mut params);

        let sql = format!(
            "SELECT {} FROM {}{}",
            self.columns.to_sql(),
            self.table,
            where_clause
        );

        Statement::query(sql, params)
    }
}
