//! Evaluable conditions over type-erased records.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use qof_query::FilterValue;
use smol_str::SmolStr;

type Eval = Arc<dyn Fn(&dyn Any) -> bool + Send + Sync>;

/// A compiled condition.
///
/// `Always` is the "no condition" value and holds for every record.
#[derive(Clone)]
pub enum Condition {
    /// Holds for every record.
    Always,
    /// Holds when `eval` returns `true`.
    Test {
        /// The test itself.
        eval: Eval,
        /// Readable rendering of the test.
        label: String,
    },
}

impl Condition {
    /// Wrap a test function.
    pub fn test<F>(label: impl Into<String>, eval: F) -> Self
    where
        F: Fn(&dyn Any) -> bool + Send + Sync + 'static,
    {
        Self::Test {
            eval: Arc::new(eval),
            label: label.into(),
        }
    }

    /// Whether this is [`Condition::Always`].
    pub fn is_always(&self) -> bool {
        matches!(self, Self::Always)
    }

    /// Evaluate against a record.
    #[inline]
    pub fn evaluate(&self, record: &dyn Any) -> bool {
        match self {
            Self::Always => true,
            Self::Test { eval, .. } => eval(record),
        }
    }

    /// Readable rendering.
    pub fn label(&self) -> &str {
        match self {
            Self::Always => "true",
            Self::Test { label, .. } => label,
        }
    }

    /// Both conditions hold.
    pub fn and(self, other: Condition) -> Condition {
        match (self, other) {
            (Self::Always, other) | (other, Self::Always) => other,
            (left, right) => {
                let label = format!("({} && {})", left.label(), right.label());
                Self::test(label, move |record| {
                    left.evaluate(record) && right.evaluate(record)
                })
            }
        }
    }

    /// Either condition holds.
    pub fn or(self, other: Condition) -> Condition {
        match (self, other) {
            (Self::Always, _) | (_, Self::Always) => Self::Always,
            (left, right) => {
                let label = format!("({} || {})", left.label(), right.label());
                Self::test(label, move |record| {
                    left.evaluate(record) || right.evaluate(record)
                })
            }
        }
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The record (or collection element) a condition is evaluated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    name: SmolStr,
    type_name: &'static str,
}

impl Binding {
    /// Create a binding.
    pub fn new(name: impl Into<SmolStr>, type_name: &'static str) -> Self {
        Self {
            name: name.into(),
            type_name,
        }
    }

    /// Parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full name of the bound type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Render a value for a condition label.
pub(crate) fn display_value(value: &FilterValue) -> String {
    match value {
        FilterValue::Null => "null".to_string(),
        FilterValue::Bool(b) => b.to_string(),
        FilterValue::Int(i) => i.to_string(),
        FilterValue::Float(f) => f.to_string(),
        FilterValue::Decimal(d) => d.to_string(),
        FilterValue::String(s) => format!("{:?}", s),
        FilterValue::DateTime(dt) => dt.to_string(),
        FilterValue::Uuid(u) => u.to_string(),
        FilterValue::List(items) => format!(
            "[{}]",
            items.iter().map(display_value).collect::<Vec<_>>().join(", ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_even() -> Condition {
        Condition::test("x % 2 == 0", |record| {
            record.downcast_ref::<i32>().is_some_and(|n| n % 2 == 0)
        })
    }

    fn is_positive() -> Condition {
        Condition::test("x > 0", |record| {
            record.downcast_ref::<i32>().is_some_and(|n| *n > 0)
        })
    }

    #[test]
    fn test_always_is_neutral_for_and() {
        let condition = Condition::Always.and(is_even());
        assert_eq!(condition.label(), "x % 2 == 0");
        assert!(condition.evaluate(&4));
        assert!(!condition.evaluate(&3));
    }

    #[test]
    fn test_combinators() {
        let both = is_even().and(is_positive());
        assert_eq!(both.label(), "(x % 2 == 0 && x > 0)");
        assert!(both.evaluate(&2));
        assert!(!both.evaluate(&-2));

        let either = is_even().or(is_positive());
        assert!(either.evaluate(&-2));
        assert!(either.evaluate(&3));
        assert!(!either.evaluate(&-3));
    }

    #[test]
    fn test_display_value() {
        let list = FilterValue::List(vec![FilterValue::Int(1), FilterValue::String("a".into())]);
        assert_eq!(display_value(&list), "[1, \"a\"]");
    }
}
