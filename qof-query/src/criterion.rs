//! A single comparison between a source property and a filter value.

use crate::error::{QueryError, QueryResult};
use crate::operator::Operator;
use crate::property::PropertyRef;
use crate::value::FilterValue;

/// One leaf comparison: `property <operator> value`.
///
/// The value is never `Null`; absent values are dropped by the builder before
/// a criterion is constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Criterion {
    property: PropertyRef,
    value: FilterValue,
    operator: Operator,
}

impl Criterion {
    /// Validate and create a criterion.
    ///
    /// Returns `Ok(None)` for an absent value.
    pub fn new(
        property: PropertyRef,
        value: FilterValue,
        operator: Operator,
    ) -> QueryResult<Option<Self>> {
        if value.is_null() {
            return Ok(None);
        }

        operator
            .accepts(property.kind(), &value)
            .map_err(|reason| QueryError::invalid_criterion(property.name(), operator, reason))?;

        Ok(Some(Self {
            property,
            value,
            operator,
        }))
    }

    /// Source property.
    pub fn property(&self) -> &PropertyRef {
        &self.property
    }

    /// Filter value.
    pub fn value(&self) -> &FilterValue {
        &self.value
    }

    /// Comparison operator.
    pub fn operator(&self) -> Operator {
        self.operator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::User;

    #[test]
    fn test_absent_value_builds_nothing() {
        let criterion = Criterion::new(User::EMAIL.erase(), FilterValue::Null, Operator::Equal);
        assert!(matches!(criterion, Ok(None)));
    }

    #[test]
    fn test_present_value_builds_criterion() {
        let criterion = Criterion::new(User::ID.erase(), FilterValue::Int(1), Operator::GreaterThan)
            .unwrap()
            .unwrap();
        assert_eq!(criterion.property().name(), "Id");
        assert_eq!(criterion.value(), &FilterValue::Int(1));
        assert_eq!(criterion.operator(), Operator::GreaterThan);
    }

    #[test]
    fn test_invalid_pair_is_rejected() {
        let err = Criterion::new(User::ID.erase(), FilterValue::String("1".into()), Operator::Contains)
            .unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::InvalidCriterion);
        assert_eq!(err.context.property.as_deref(), Some("Id"));
    }
}
