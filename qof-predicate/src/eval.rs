//! Comparison of filter values at evaluation time.

use std::cmp::Ordering;

use qof_query::{FilterValue, Operator};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

/// Apply `operator` to a property value read from a record and the
/// criterion's value.
///
/// A `Null` property value never matches. Text comparisons are
/// case-sensitive.
pub fn compare(operator: Operator, actual: &FilterValue, expected: &FilterValue) -> bool {
    if actual.is_null() {
        return false;
    }

    match operator {
        Operator::Equal => values_equal(actual, expected),
        Operator::LessThan => order(actual, expected) == Some(Ordering::Less),
        Operator::GreaterThan => order(actual, expected) == Some(Ordering::Greater),
        Operator::LessThanOrEqual => matches!(
            order(actual, expected),
            Some(Ordering::Less | Ordering::Equal)
        ),
        Operator::GreaterThanOrEqual => matches!(
            order(actual, expected),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        Operator::Contains => match (actual.as_str(), expected.as_str()) {
            (Some(text), Some(needle)) => text.contains(needle),
            _ => false,
        },
        Operator::StartsWith => match (actual.as_str(), expected.as_str()) {
            (Some(text), Some(prefix)) => text.starts_with(prefix),
            _ => false,
        },
        Operator::In => expected
            .as_list()
            .is_some_and(|items| items.iter().any(|item| values_equal(actual, item))),
    }
}

/// Equality with numeric variants compared by value.
pub fn values_equal(left: &FilterValue, right: &FilterValue) -> bool {
    match (left, right) {
        (FilterValue::Null, _) | (_, FilterValue::Null) => false,
        _ if is_numeric(left) && is_numeric(right) => {
            order(left, right) == Some(Ordering::Equal)
        }
        _ => left == right,
    }
}

/// Ordering of two values of comparable variants.
///
/// Numbers compare across `Int`, `Float` and `Decimal`; strings, date-times
/// and UUIDs compare within their own variant. Everything else is unordered.
pub fn order(left: &FilterValue, right: &FilterValue) -> Option<Ordering> {
    use FilterValue as V;

    match (left, right) {
        (V::Int(a), V::Int(b)) => Some(a.cmp(b)),
        (V::Decimal(a), V::Decimal(b)) => Some(a.cmp(b)),
        (V::Int(a), V::Decimal(b)) => Some(Decimal::from(*a).cmp(b)),
        (V::Decimal(a), V::Int(b)) => Some(a.cmp(&Decimal::from(*b))),
        (V::Float(a), V::Float(b)) => a.partial_cmp(b),
        (V::Float(a), V::Int(b)) => a.partial_cmp(&(*b as f64)),
        (V::Int(a), V::Float(b)) => (*a as f64).partial_cmp(b),
        (V::Float(a), V::Decimal(b)) => decimal_from_float(*a).map_or_else(
            || a.partial_cmp(&b.to_f64()?),
            |a| Some(a.cmp(b)),
        ),
        (V::Decimal(a), V::Float(b)) => decimal_from_float(*b).map_or_else(
            || a.to_f64()?.partial_cmp(b),
            |b| Some(a.cmp(&b)),
        ),
        (V::String(a), V::String(b)) => Some(a.cmp(b)),
        (V::DateTime(a), V::DateTime(b)) => Some(a.cmp(b)),
        (V::Uuid(a), V::Uuid(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn decimal_from_float(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value)
}

fn is_numeric(value: &FilterValue) -> bool {
    matches!(
        value,
        FilterValue::Int(_) | FilterValue::Float(_) | FilterValue::Decimal(_)
    )
}
