//! Filter values and the declared kinds of properties.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use uuid::Uuid;

/// A value compared against a source property.
///
/// `Null` marks an absent filter value. The builder never records a criterion
/// whose value is `Null`.
///
/// Serialized adjacently tagged, so every variant reads back as itself:
///
/// ```rust
/// use qof_query::FilterValue;
///
/// let json = r#"{"type":"list","value":[{"type":"int","value":1},{"type":"string","value":"42"}]}"#;
/// let value: FilterValue = serde_json::from_str(json).unwrap();
/// assert_eq!(
///     value,
///     FilterValue::List(vec![FilterValue::Int(1), FilterValue::String("42".into())])
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FilterValue {
    /// Absent value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Decimal value.
    Decimal(Decimal),
    /// String value.
    String(String),
    /// Date-time value.
    DateTime(NaiveDateTime),
    /// UUID value.
    Uuid(Uuid),
    /// List of values.
    List(Vec<FilterValue>),
}

impl FilterValue {
    /// Check if this is the absent marker.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if this is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Borrow the string content, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the items, if this is a list.
    pub fn as_list(&self) -> Option<&[FilterValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The kind this value naturally has, `None` for `Null`.
    pub fn kind(&self) -> Option<ValueKind> {
        Some(match self {
            Self::Null => return None,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Decimal(_) => ValueKind::Decimal,
            Self::String(_) => ValueKind::Text,
            Self::DateTime(_) => ValueKind::DateTime,
            Self::Uuid(_) => ValueKind::Uuid,
            Self::List(_) => ValueKind::List,
        })
    }
}

impl Default for FilterValue {
    fn default() -> Self {
        Self::Null
    }
}

impl<T: ValueType> From<Option<T>> for FilterValue {
    fn from(v: Option<T>) -> Self {
        v.to_value()
    }
}

macro_rules! filter_value_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for FilterValue {
                fn from(v: $ty) -> Self {
                    v.to_value()
                }
            }
        )*
    };
}

filter_value_from!(bool, i32, i64, f64, String, &str, Decimal, NaiveDateTime, Uuid);

impl<T: ValueType> From<Vec<T>> for FilterValue {
    fn from(v: Vec<T>) -> Self {
        v.to_value()
    }
}

/// Declared kind of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// `bool`.
    Bool,
    /// Signed and unsigned integers.
    Int,
    /// `f32` / `f64`.
    Float,
    /// `rust_decimal::Decimal`.
    Decimal,
    /// Strings.
    Text,
    /// Dates and date-times.
    DateTime,
    /// `uuid::Uuid`.
    Uuid,
    /// Lists of values.
    List,
    /// Known only from the value itself, as for `FilterValue` fields.
    Any,
}

impl ValueKind {
    /// Whether the kind is text (the default operator for text is `Contains`).
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }

    /// Whether values of this kind are numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Float | Self::Decimal)
    }

    /// Whether a property of this kind can be compared with `value`.
    ///
    /// Numbers compare across `Int`, `Float` and `Decimal`. `List` and `Any`
    /// properties have no element kind to check against; `Null` is admitted
    /// everywhere.
    pub fn admits(&self, value: &FilterValue) -> bool {
        match value.kind() {
            None => true,
            Some(_) if matches!(self, Self::List | Self::Any) => true,
            Some(other) => other == *self || (other.is_numeric() && self.is_numeric()),
        }
    }
}

/// A Rust type usable as a property or filter value.
///
/// `KIND` is the declared kind used by the builder; `to_value` reads a
/// borrowed value into a [`FilterValue`], mapping `None` to `Null`.
pub trait ValueType {
    /// Declared kind.
    const KIND: ValueKind;

    /// Convert to a filter value.
    fn to_value(&self) -> FilterValue;
}

macro_rules! int_value_type {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ValueType for $ty {
                const KIND: ValueKind = ValueKind::Int;

                #[inline]
                fn to_value(&self) -> FilterValue {
                    FilterValue::Int(i64::from(*self))
                }
            }
        )*
    };
}

int_value_type!(i8, i16, i32, i64, u8, u16, u32);

impl ValueType for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn to_value(&self) -> FilterValue {
        FilterValue::Bool(*self)
    }
}

impl ValueType for f32 {
    const KIND: ValueKind = ValueKind::Float;

    fn to_value(&self) -> FilterValue {
        FilterValue::Float(f64::from(*self))
    }
}

impl ValueType for f64 {
    const KIND: ValueKind = ValueKind::Float;

    fn to_value(&self) -> FilterValue {
        FilterValue::Float(*self)
    }
}

impl ValueType for Decimal {
    const KIND: ValueKind = ValueKind::Decimal;

    fn to_value(&self) -> FilterValue {
        FilterValue::Decimal(*self)
    }
}

impl ValueType for str {
    const KIND: ValueKind = ValueKind::Text;

    fn to_value(&self) -> FilterValue {
        FilterValue::String(self.to_string())
    }
}

impl ValueType for String {
    const KIND: ValueKind = ValueKind::Text;

    fn to_value(&self) -> FilterValue {
        FilterValue::String(self.clone())
    }
}

impl ValueType for SmolStr {
    const KIND: ValueKind = ValueKind::Text;

    fn to_value(&self) -> FilterValue {
        FilterValue::String(self.to_string())
    }
}

impl ValueType for NaiveDateTime {
    const KIND: ValueKind = ValueKind::DateTime;

    fn to_value(&self) -> FilterValue {
        FilterValue::DateTime(*self)
    }
}

impl ValueType for NaiveDate {
    const KIND: ValueKind = ValueKind::DateTime;

    fn to_value(&self) -> FilterValue {
        FilterValue::DateTime(self.and_time(chrono::NaiveTime::default()))
    }
}

impl ValueType for DateTime<Utc> {
    const KIND: ValueKind = ValueKind::DateTime;

    fn to_value(&self) -> FilterValue {
        FilterValue::DateTime(self.naive_utc())
    }
}

impl ValueType for Uuid {
    const KIND: ValueKind = ValueKind::Uuid;

    fn to_value(&self) -> FilterValue {
        FilterValue::Uuid(*self)
    }
}

// Lets callers pass a prebuilt value as a literal. As a property type the
// kind is only known per value.
impl ValueType for FilterValue {
    const KIND: ValueKind = ValueKind::Any;

    fn to_value(&self) -> FilterValue {
        self.clone()
    }
}

impl<T: ValueType> ValueType for Option<T> {
    const KIND: ValueKind = T::KIND;

    fn to_value(&self) -> FilterValue {
        match self {
            Some(v) => v.to_value(),
            None => FilterValue::Null,
        }
    }
}

impl<T: ValueType> ValueType for Vec<T> {
    const KIND: ValueKind = ValueKind::List;

    fn to_value(&self) -> FilterValue {
        FilterValue::List(self.iter().map(ValueType::to_value).collect())
    }
}

impl<T: ValueType> ValueType for [T] {
    const KIND: ValueKind = ValueKind::List;

    fn to_value(&self) -> FilterValue {
        FilterValue::List(self.iter().map(ValueType::to_value).collect())
    }
}

impl<T: ValueType + ?Sized> ValueType for &T {
    const KIND: ValueKind = T::KIND;

    #[inline]
    fn to_value(&self) -> FilterValue {
        (**self).to_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_value_from() {
        assert_eq!(FilterValue::from(42i32), FilterValue::Int(42));
        assert_eq!(FilterValue::from("hello"), FilterValue::String("hello".to_string()));
        assert_eq!(FilterValue::from(true), FilterValue::Bool(true));
        assert_eq!(FilterValue::from(None::<i64>), FilterValue::Null);
    }

    #[test]
    fn test_option_is_absent_when_none() {
        let email: Option<String> = None;
        assert!(email.to_value().is_null());
        assert_eq!(<Option<String> as ValueType>::KIND, ValueKind::Text);
    }

    #[test]
    fn test_list_values() {
        let statuses = vec![1, 2, 3];
        let value = statuses.to_value();
        assert!(value.is_list());
        assert_eq!(value.as_list().map(<[FilterValue]>::len), Some(3));
        assert_eq!(<Vec<i32> as ValueType>::KIND, ValueKind::List);
    }

    #[test]
    fn test_reference_values() {
        let name = String::from("Ivan");
        let by_ref: &String = &name;
        assert_eq!(by_ref.to_value(), FilterValue::String("Ivan".into()));
        assert_eq!("x".to_value().kind(), Some(ValueKind::Text));
    }

    #[test]
    fn test_date_values() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let value = date.to_value();
        assert_eq!(
            value,
            FilterValue::DateTime(date.and_hms_opt(0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_dynamic_values_admit_any_kind() {
        assert_eq!(<FilterValue as ValueType>::KIND, ValueKind::Any);
        assert_eq!(<Option<FilterValue> as ValueType>::KIND, ValueKind::Any);
        assert!(ValueKind::Any.admits(&FilterValue::Bool(true)));
        assert!(ValueKind::Any.admits(&FilterValue::String("x".into())));
        assert!(!ValueKind::Text.admits(&FilterValue::Bool(true)));
    }

    #[test]
    fn test_tagged_serialization() {
        let value = FilterValue::List(vec![FilterValue::Int(1), FilterValue::String("a".into())]);
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"type":"list","value":[{"type":"int","value":1},{"type":"string","value":"a"}]}"#
        );
        assert_eq!(serde_json::to_string(&FilterValue::Null).unwrap(), r#"{"type":"null"}"#);
    }

    #[test]
    fn test_serde_keeps_variant() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 0)
            .unwrap();
        let values = vec![
            FilterValue::Null,
            FilterValue::Bool(false),
            FilterValue::Int(42),
            FilterValue::Float(42.0),
            FilterValue::String("42".into()),
            FilterValue::String("1.5".into()),
            FilterValue::Decimal(Decimal::new(15, 1)),
            FilterValue::String("2024-03-09T07:05:00".into()),
            FilterValue::DateTime(at),
            FilterValue::Uuid(Uuid::nil()),
            FilterValue::String(Uuid::nil().to_string()),
            FilterValue::List(vec![FilterValue::Decimal(Decimal::new(42, 0)), FilterValue::Int(42)]),
        ];

        for value in values {
            let json = serde_json::to_string(&value).unwrap();
            let back: FilterValue = serde_json::from_str(&json).unwrap();
            assert_eq!(back, value, "{}", json);
            assert_eq!(back.kind(), value.kind());
        }
    }
}
