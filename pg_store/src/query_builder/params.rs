use type_mapping::BindValue;

/// Positional parameter allocator.
///
/// Pushing a value appends it and hands back its placeholder, so placeholder
/// `$n` always refers to the nth pushed value no matter how many clauses
/// contributed to the statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: Vec<BindValue>,
}

impl Params {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Append a value and return its placeholder (`$1`, `$2`, ...)
    pub fn push(&mut self, value: impl Into<BindValue>) -> String {
        self.values.push(value.into());
        format!("${}", self.values.len())
    }

    pub fn into_values(self) -> Vec<BindValue> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_follow_push_order() {
        let mut params = Params::new();
        assert_eq!(params.push("a"), "$1");
        assert_eq!(params.push(2), "$2");
        assert_eq!(
            params.into_values(),
            vec![BindValue::Text("a".into()), BindValue::Integer(2)]
        );
    }

    #[test]
    fn test_numbering_continues_across_clauses() {
        let mut params = Params::new();
        let set: Vec<String> = (0..3).map(|i| params.push(i)).collect();
        let cond: Vec<String> = (0..2).map(|i| params.push(i)).collect();
        assert_eq!(set, vec!["$1", "$2", "$3"]);
        assert_eq!(cond, vec!["$4", "$5"]);
        assert_eq!(params.into_values().len(), 5);
    }
}
