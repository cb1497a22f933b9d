//! Query builder utilities
//!
//! Clause rendering shared by the request builders.

use super::filter::{FieldMap, LogicalOperator};
use super::params::Params;
use type_mapping::BindValue;

pub struct SqlGenerator;

impl SqlGenerator {
    /// Build ` WHERE a = $n <op> b = $n+1 ...`, or an empty string for no conditions
    pub fn build_where_clause(
        conditions: &FieldMap,
        operator: LogicalOperator,
        params: &mut Params,
    ) -> String {
        if conditions.is_empty() {
            return String::new();
        }

        let conditions_sql = conditions
            .iter()
            .map(|(column, value)| format!("{} = {}", column, params.push(value.clone())))
            .collect::<Vec<_>>()
            .join(operator.to_sql());

        format!(" WHERE {}", conditions_sql)
    }

    /// Build `a = $n, b = $n+1 ...` for UPDATE
    pub fn build_set_clause(fields: &FieldMap, params: &mut Params) -> String {
        fields
            .iter()
            .map(|(column, value)| format!("{} = {}", column, params.push(value.clone())))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Build `($n, $n+1, ...)` for one VALUES tuple
    pub fn build_values_tuple<'a, I>(values: I, params: &mut Params) -> String
    where
        I: IntoIterator<Item = &'a BindValue>,
    {
        let placeholders = values
            .into_iter()
            .map(|value| params.push(value.clone()))
            .collect::<Vec<_>>();

        format!("({})", placeholders.join(", "))
    }

    /// Build `a = EXCLUDED.a, b = EXCLUDED.b`
    pub fn build_excluded_assignments(columns: &[String]) -> String {
        columns
            .iter()
            .map(|column| format!("{} = EXCLUDED.{}", column, column))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
