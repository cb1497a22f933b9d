use super::filter::FieldMap;
use super::params::Params;
use super::sql_generation::SqlGenerator;
use super::statement::Statement;
use crate::errors::BuildError;
use type_mapping::BindValue;

/// INSERT ... ON CONFLICT (targets) DO UPDATE SET col = EXCLUDED.col
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Upsert {
    pub table: String,
    pub values: FieldMap,
    pub conflict_columns: Vec<String>,
    pub update_columns: Vec<String>,
}

impl Upsert {
    pub fn new(table: impl Into<String>, values: FieldMap) -> Self {
        Self {
            table: table.into(),
            values,
            ..Default::default()
        }
    }

    pub fn on_conflict<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conflict_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Columns overwritten from the incoming row; none means DO NOTHING
    pub fn update<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.update_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(&self) -> Result<Statement, BuildError> {
        if self.values.is_empty() {
            return Err(BuildError::EmptyValues);
        }
        if self.conflict_columns.is_empty() {
            return Err(BuildError::NoConflictTarget);
        }

        let mut params = Params::new();
        let columns = self.values.columns().collect::<Vec<_>>().join(", ");
        let tuple =
            SqlGenerator::build_values_tuple(self.values.iter().map(|(_, v)| v), &mut params);

        let action = if self.update_columns.is_empty() {
            "DO NOTHING".to_string()
        } else {
            format!(
                "DO UPDATE SET {}",
                SqlGenerator::build_excluded_assignments(&self.update_columns)
            )
        };

        let sql = format!(
            "INSERT INTO {} ({}) VALUES {} ON CONFLICT ({}) {}",
            self.table,
            columns,
            tuple,
            self.conflict_columns.join(", "),
            action
        );

        Ok(Statement::command(sql, params))
    }
}

/// Columns and status value that decide whether an existing row may be taken over
#[derive(Debug, Clone, PartialEq)]
pub struct ExpiryRule {
    /// Natural key the conflict is detected on
    pub key_column: String,
    pub status_column: String,
    /// Status value marking the existing row as reclaimable
    pub inactive_status: BindValue,
    /// Creation timestamp; reset to NOW() when the row is taken over
    pub created_column: String,
}

impl Default for ExpiryRule {
    fn default() -> Self {
        Self {
            key_column: "m_name".to_string(),
            status_column: "m_status".to_string(),
            inactive_status: BindValue::Integer(0),
            created_column: "created_at".to_string(),
        }
    }
}

/// Insert a row, or take over the conflicting one only when it is inactive
/// and older than the deadline.
///
/// A live or fresh conflicting row is left untouched and the statement
/// returns no rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceIfExpired {
    pub table: String,
    pub values: FieldMap,
    pub deadline_seconds: u64,
    pub rule: ExpiryRule,
}

impl ReplaceIfExpired {
    pub fn new(table: impl Into<String>, values: FieldMap, deadline_seconds: u64) -> Self {
        Self {
            table: table.into(),
            values,
            deadline_seconds,
            rule: ExpiryRule::default(),
        }
    }

    pub fn rule(mut self, rule: ExpiryRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn build(&self) -> Result<Statement, BuildError> {
        if self.values.is_empty() {
            return Err(BuildError::EmptyValues);
        }
        let rule = &self.rule;
        if !self.values.contains(&rule.key_column) {
            return Err(BuildError::MissingConflictKey(rule.key_column.clone()));
        }

        let mut params = Params::new();
        let mut key_placeholder = String::new();
        let mut columns = Vec::with_capacity(self.values.len());
        let mut placeholders = Vec::with_capacity(self.values.len());
        let mut assignments = Vec::new();

        for (column, value) in self.values.iter() {
            let placeholder = params.push(value.clone());
            if column == rule.key_column {
                key_placeholder = placeholder.clone();
            } else if column != rule.created_column {
                // the incoming value is reused, not bound twice
                assignments.push(format!("{} = {}", column, placeholder));
            }
            columns.push(column);
            placeholders.push(placeholder);
        }
        assignments.push(format!("{} = NOW()", rule.created_column));

        let status = params.push(rule.inactive_status.clone());
        // make_interval takes fractional seconds
        let deadline = params.push(BindValue::Double(self.deadline_seconds as f64));

        let sql = format!(
            "INSERT INTO {table} ({columns}) VALUES ({values}) \
             ON CONFLICT ({key}) DO UPDATE SET {assignments} \
             WHERE {table}.{key} = {key_placeholder} \
             AND {table}.{status_column} = {status} \
             AND {table}.{created} < NOW() - make_interval(secs => {deadline}) \
             RETURNING id",
            table = self.table,
            columns = columns.join(", "),
            values = placeholders.join(", "),
            key = rule.key_column,
            assignments = assignments.join(", "),
            key_placeholder = key_placeholder,
            status_column = rule.status_column,
            status = status,
            created = rule.created_column,
            deadline = deadline,
        );

        Ok(Statement::query(sql, params))
    }
}
