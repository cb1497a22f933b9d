use super::filter::FieldMap;
use super::params::Params;
use super::sql_generation::SqlGenerator;
use super::statement::Statement;
use crate::errors::BuildError;
use type_mapping::BindValue;

/// Multi-row INSERT of fixed-width value tuples
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertMany {
    pub table: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<BindValue>>,
}

impl InsertMany {
    pub fn new<I, S>(table: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append one row; its width must match the column count
    pub fn row<I, V>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<BindValue>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
        self
    }

    /// `INSERT INTO t (a, b) VALUES ($1, $2), ($3, $4) RETURNING id`
    pub fn build(&self) -> Result<Statement, BuildError> {
        let expected = self.columns.len();
        if let Some((row, found)) = self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != expected)
            .map(|(i, row)| (i, row.len()))
        {
            return Err(BuildError::WidthMismatch {
                row,
                expected,
                found,
            });
        }
        if self.columns.is_empty() {
            return Err(BuildError::NoColumns);
        }
        if self.rows.is_empty() {
            return Err(BuildError::NoRows);
        }

        let mut params = Params::new();
        let tuples = self
            .rows
            .iter()
            .map(|row| SqlGenerator::build_values_tuple(row, &mut params))
            .collect::<Vec<_>>()
            .join(", ");

        let sql = format!(
            "INSERT INTO {} ({}) VALUES {} RETURNING id",
            self.table,
            self.columns.join(", "),
            tuples
        );

        Ok(Statement::query(sql, params))
    }
}

/// Single-row INSERT from a column/value map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertOne {
    pub table: String,
    pub values: FieldMap,
}

impl InsertOne {
    pub fn new(table: impl Into<String>, values: FieldMap) -> Self {
        Self {
            table: table.into(),
            values,
        }
    }

    /// `INSERT INTO t (a, b) VALUES ($1, $2) RETURNING id`
    pub fn build(&self) -> Result<Statement, BuildError> {
        if self.values.is_empty() {
            return Err(BuildError::EmptyValues);
        }

        let mut params = Params::new();
        let columns = self.values.columns().collect::<Vec<_>>().join(", ");
        let tuple = SqlGenerator::build_values_tuple(self.values.iter().map(|(_, v)| v), &mut params);

        let sql = format!(
            "INSERT INTO {} ({}) VALUES {} RETURNING id",
            self.table, columns, tuple
        );

        Ok(Statement::query(sql, params))
    }
}
