//! Integration tests for query-text configuration.
//!
//! These tests verify that TOML and environment configuration reach the
//! rendered output.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use qof::prelude::*;
use qof::{ErrorCode, FilterConverters, SqlConfig};

#[derive(Reflect)]
struct Order {
    id: i64,
    placed_at: chrono::NaiveDateTime,
    note: String,
}

#[derive(Default)]
struct OrderQuery {
    id: Option<i64>,
    placed_after: Option<chrono::NaiveDateTime>,
    note: Option<String>,
    ids: Option<Vec<i64>>,
}

fn placed_after() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_opt(8, 30, 0)
        .unwrap()
}

/// Test a minimal configuration keeps every default
#[test]
fn test_config_minimal() {
    let config = SqlConfig::from_toml_str("").unwrap();
    assert_eq!(config, SqlConfig::default());
    assert_eq!(config.always_true, "1 = 1");
}

/// Test a full configuration drives the renderer
#[test]
fn test_config_full() {
    let config = SqlConfig::from_toml_str(
        r#"
        parameter = "o"
        datetime_format = "%Y-%m-%d %H:%M:%S"
        always_true = "TRUE"
        always_false = "FALSE"
        quote_identifiers = true
    "#,
    )
    .unwrap();
    let converters = FilterConverters::builder().sql_config(config).build().unwrap();

    let query = OrderQuery {
        placed_after: Some(placed_after()),
        note: Some("it's".into()),
        ..Default::default()
    };
    let mut criteria = FilterCriteria::<Order, _>::new(&query);
    criteria
        .root()
        .add_criterion(Order::PLACED_AT, |q| q.placed_after, Operator::GreaterThanOrEqual)
        .unwrap()
        .add_criterion(Order::NOTE, |q| &q.note, Operator::StartsWith)
        .unwrap();

    assert_eq!(
        converters.to_sql_default(&criteria).unwrap(),
        "o.PlacedAt >= '2024-03-09 08:30:00' AND o.Note LIKE 'it''s%'"
    );

    let empty = OrderQuery::default();
    let mut criteria = FilterCriteria::<Order, _>::new(&empty);
    criteria
        .root()
        .add_criterion(Order::ID, |q| q.id, Operator::Equal)
        .unwrap();
    assert_eq!(converters.to_sql_default(&criteria).unwrap(), "TRUE");
}

/// Test the default date-time format
#[test]
fn test_default_datetime_format() {
    let query = OrderQuery {
        placed_after: Some(placed_after()),
        ..Default::default()
    };
    let mut criteria = FilterCriteria::<Order, _>::new(&query);
    criteria
        .root()
        .add_criterion(Order::PLACED_AT, |q| q.placed_after, Operator::LessThan)
        .unwrap();

    assert_eq!(
        FilterConverters::new().to_sql(&criteria, "").unwrap(),
        "PlacedAt < '2024.03.09 08:30:00'"
    );
}

/// Test an empty `IN` list uses the configured false literal
#[test]
fn test_empty_in_list() {
    let query = OrderQuery {
        ids: Some(Vec::new()),
        ..Default::default()
    };
    let mut criteria = FilterCriteria::<Order, _>::new(&query);
    criteria
        .root()
        .add_criterion(Order::ID, |q| &q.ids, Operator::In)
        .unwrap();

    assert_eq!(FilterConverters::new().to_sql(&criteria, "").unwrap(), "1 = 0");

    let predicate = FilterConverters::new().to_predicate(&criteria, "o").unwrap();
    let orders = vec![Order {
        id: 1,
        placed_at: placed_after(),
        note: String::new(),
    }];
    assert_eq!(predicate.filter(&orders).count(), 0);
}

/// Test unknown keys are rejected
#[test]
fn test_config_unknown_key() {
    let err = SqlConfig::from_toml_str("dialect = \"postgres\"").unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidConfiguration);
}

/// Test a malformed date-time format is rejected
#[test]
fn test_config_bad_datetime_format() {
    let err = SqlConfig::from_toml_str("datetime_format = \"%Q\"").unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidConfiguration);
}

/// Test environment overrides through a custom lookup
#[test]
fn test_config_env_vars() {
    let config = SqlConfig::from_vars(|name| match name {
        "QOF_SQL_PARAMETER" => Some("x".to_string()),
        "QOF_SQL_QUOTE_IDENTIFIERS" => Some("1".to_string()),
        _ => None,
    })
    .unwrap();

    assert_eq!(config.parameter, "x");
    assert!(config.quote_identifiers);
    assert_eq!(config.always_false, "1 = 0");

    let err = SqlConfig::from_vars(|name| {
        (name == "QOF_SQL_QUOTE_IDENTIFIERS").then(|| "maybe".to_string())
    })
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidConfiguration);
}

/// Test reserved words are quoted when requested
#[test]
fn test_reserved_identifiers_are_quoted() {
    let config = SqlConfig::builder()
        .parameter("order")
        .quote_identifiers(true)
        .build()
        .unwrap();
    let converters = FilterConverters::builder().sql_config(config).build().unwrap();

    let query = OrderQuery {
        id: Some(9),
        ..Default::default()
    };
    let mut criteria = FilterCriteria::<Order, _>::new(&query);
    criteria
        .root()
        .add_criterion(Order::ID, |q| q.id, Operator::Equal)
        .unwrap();

    assert_eq!(converters.to_sql_default(&criteria).unwrap(), "\"order\".Id = 9");
}
