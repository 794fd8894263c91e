//! Integration tests for building and compiling criteria trees.
//!
//! These tests drive the public facade end to end:
//! - Building trees with derived property descriptors
//! - Compiling to query text and to in-memory predicates
//! - Automatic wiring of same-named properties
//! - Error reporting at build time

use pretty_assertions::assert_eq;
use qof::prelude::*;
use qof::{ErrorCode, GroupId};

#[derive(Debug, Clone, PartialEq, Reflect)]
struct LoginData {
    login_value: String,
    login_provider_name: String,
}

#[derive(Debug, Clone, PartialEq, Reflect)]
struct UserProjection {
    id: i64,
    email: String,
    first_name: String,
    middle_name: String,
    last_name: String,
    active_directory_name: String,
    status: i32,
    #[qof(collection)]
    logins: Vec<LoginData>,
}

#[derive(Debug, Default, Reflect)]
struct GetUserQuery {
    id: Option<i64>,
    email: Option<String>,
    name: Option<String>,
    active_directory_name: Option<String>,
    login: Option<String>,
    login_provider_name: Option<String>,
    #[qof(rename = "Status")]
    statuses: Option<Vec<i32>>,
    #[qof(skip)]
    skip: Option<i32>,
    #[qof(skip)]
    take: Option<i32>,
}

fn user(id: i64, last: &str, first: &str, provider: &str, status: i32) -> UserProjection {
    UserProjection {
        id,
        email: format!("u{}@user.com", id),
        first_name: first.to_string(),
        middle_name: format!("{}ovich", first),
        last_name: last.to_string(),
        active_directory_name: format!("u{}", id),
        status,
        logins: vec![LoginData {
            login_value: format!("u{}", id),
            login_provider_name: provider.to_string(),
        }],
    }
}

fn users() -> Vec<UserProjection> {
    vec![
        user(1, "Ivanov", "Ivan", "IS1", 1),
        user(2, "Petrov", "Petr", "IS2", 1),
        user(3, "Sidorov", "Sergey", "IS1", 2),
        user(4, "Popov", "Nikolay", "IS2", 1),
        user(5, "Sokolov", "Ivan", "IS1", 3),
    ]
}

/// The full sample tree: nested groups, a collection and an `In` list.
fn sample_criteria(query: &GetUserQuery) -> FilterCriteria<'_, UserProjection, GetUserQuery> {
    let mut criteria = FilterCriteria::new(query);
    criteria
        .and_group()
        .add_criterion(UserProjection::ID, |q| q.id, Operator::GreaterThan)
        .unwrap()
        .add_criterion(UserProjection::EMAIL, |q| &q.email, Operator::Equal)
        .unwrap()
        .or_group()
        .add_criterion(UserProjection::LAST_NAME, |q| &q.name, Operator::StartsWith)
        .unwrap()
        .add_criterion(UserProjection::FIRST_NAME, |q| &q.name, Operator::Contains)
        .unwrap()
        .add_criterion(UserProjection::MIDDLE_NAME, |q| &q.name, Operator::Contains)
        .unwrap()
        .close_group()
        .add_criterion(
            UserProjection::ACTIVE_DIRECTORY_NAME,
            |q| &q.active_directory_name,
            Operator::Equal,
        )
        .unwrap()
        .or_group()
        .add_collection_criterion(
            UserProjection::LOGINS,
            LoginData::LOGIN_VALUE,
            |q| &q.login,
            Operator::Equal,
        )
        .unwrap()
        .add_collection_criterion(
            UserProjection::LOGINS,
            LoginData::LOGIN_PROVIDER_NAME,
            |q| &q.login_provider_name,
            Operator::Equal,
        )
        .unwrap()
        .close_group()
        .add_criterion(UserProjection::STATUS, |q| &q.statuses, Operator::In)
        .unwrap();
    criteria
}

#[test]
fn test_sample_tree_to_sql() {
    let query = GetUserQuery {
        id: Some(1),
        login: Some("u3".into()),
        login_provider_name: Some("IS1".into()),
        statuses: Some(vec![1, 2, 3]),
        ..Default::default()
    };
    let criteria = sample_criteria(&query);

    let sql = FilterConverters::new().to_sql(&criteria, "").unwrap();
    assert_eq!(
        sql,
        "(Id > 1 AND Status IN (1, 2, 3) AND (Logins.LoginValue = 'u3' OR Logins.LoginProviderName = 'IS1'))"
    );
}

#[test]
fn test_sample_tree_to_predicate() {
    let query = GetUserQuery {
        id: Some(1),
        login: Some("u3".into()),
        login_provider_name: Some("IS1".into()),
        statuses: Some(vec![1, 2, 3]),
        ..Default::default()
    };
    let criteria = sample_criteria(&query);

    let predicate = FilterConverters::new().to_predicate(&criteria, "x").unwrap();
    let records = users();
    let ids: Vec<i64> = predicate.filter(&records).map(|u| u.id).collect();

    // Id > 1, some login is u3 or from IS1, status in 1..=3
    assert_eq!(ids, vec![3, 5]);
}

#[test]
fn test_or_group_inside_and_root() {
    let query = GetUserQuery {
        id: Some(1),
        email: Some("a@b.com".into()),
        name: Some("I".into()),
        ..Default::default()
    };
    let mut criteria = FilterCriteria::<UserProjection, _>::new(&query);
    criteria
        .root()
        .add_criterion(UserProjection::ID, |q| q.id, Operator::GreaterThan)
        .unwrap()
        .add_criterion(UserProjection::EMAIL, |q| &q.email, Operator::Equal)
        .unwrap()
        .or_group()
        .add_criterion(UserProjection::LAST_NAME, |q| &q.name, Operator::StartsWith)
        .unwrap()
        .add_criterion(UserProjection::FIRST_NAME, |q| &q.name, Operator::Contains)
        .unwrap();

    assert_eq!(
        FilterConverters::new().to_sql(&criteria, "").unwrap(),
        "Id > 1 AND Email = 'a@b.com' AND (LastName LIKE 'I%' OR FirstName LIKE '%I%')"
    );
}

#[test]
fn test_empty_query_matches_everything() {
    let query = GetUserQuery::default();
    let criteria = sample_criteria(&query);
    let converters = FilterConverters::new();

    assert_eq!(converters.to_sql(&criteria, "").unwrap(), "1 = 1");

    let predicate = converters.to_predicate(&criteria, "x").unwrap();
    assert!(predicate.is_always());
    assert_eq!(predicate.filter(&users()).count(), 5);
}

#[test]
fn test_status_in_list_keeps_order() {
    let query = GetUserQuery {
        statuses: Some(vec![1, 2, 3]),
        ..Default::default()
    };
    let mut criteria = FilterCriteria::<UserProjection, _>::new(&query);
    criteria
        .root()
        .add_criterion(UserProjection::STATUS, |q| &q.statuses, Operator::In)
        .unwrap();

    let records = vec![
        user(1, "A", "A", "IS1", 1),
        user(2, "B", "B", "IS1", 4),
        user(3, "C", "C", "IS1", 3),
        user(4, "D", "D", "IS1", 2),
    ];
    let predicate = FilterConverters::new().to_predicate(&criteria, "x").unwrap();
    let matched: Vec<&UserProjection> = predicate.filter(&records).collect();

    assert_eq!(matched, vec![&records[0], &records[2], &records[3]]);
}

#[test]
fn test_backends_agree_on_nested_groups() {
    let query = GetUserQuery {
        id: Some(2),
        name: Some("Iv".into()),
        ..Default::default()
    };
    let criteria = sample_criteria(&query);
    let converters = FilterConverters::new();

    assert_eq!(
        converters.to_sql(&criteria, "u").unwrap(),
        "(u.Id > 2 AND (u.LastName LIKE 'Iv%' OR u.FirstName LIKE '%Iv%' OR u.MiddleName LIKE '%Iv%'))"
    );

    let predicate = converters.to_predicate(&criteria, "u").unwrap();
    let ids: Vec<i64> = predicate.filter(&users()).map(|u| u.id).collect();
    assert_eq!(ids, vec![5]);
}

#[test]
fn test_auto_wiring_from_properties() {
    let query = GetUserQuery {
        id: Some(3),
        email: Some("u3".into()),
        statuses: Some(vec![2]),
        skip: Some(10),
        ..Default::default()
    };
    let mut criteria = FilterCriteria::<UserProjection, _>::new(&query);
    criteria.root().add_criteria_from_properties();

    assert_eq!(
        FilterConverters::new().to_sql(&criteria, "").unwrap(),
        "Id = 3 AND Email LIKE '%u3%' AND Status IN (2)"
    );
}

#[test]
fn test_auto_wiring_skips_used_properties() {
    let query = GetUserQuery {
        id: Some(1),
        email: Some("u".into()),
        active_directory_name: Some("u5".into()),
        ..Default::default()
    };
    let mut criteria = FilterCriteria::<UserProjection, _>::new(&query);
    criteria
        .root()
        .add_criterion(UserProjection::ID, |q| q.id, Operator::GreaterThan)
        .unwrap()
        .or_group()
        .add_criterion(UserProjection::EMAIL, |q| &q.email, Operator::StartsWith)
        .unwrap()
        .close_group()
        .add_criteria_from_unused_properties();

    assert_eq!(
        FilterConverters::new().to_sql(&criteria, "").unwrap(),
        "Id > 1 AND ActiveDirectoryName LIKE '%u5%' AND Email LIKE 'u%'"
    );
}

#[test]
fn test_unknown_property_name_is_build_error() {
    let query = GetUserQuery::default();
    let mut criteria = FilterCriteria::<UserProjection, _>::new(&query);
    let err = criteria
        .root()
        .add_criterion("Nickname", |q| &q.name, Operator::Equal)
        .err()
        .unwrap();

    assert_eq!(err.code, ErrorCode::InvalidProperty);
    assert!(err.is_build_error());
    assert!(err.display_full().contains("Nickname"));
}

#[test]
fn test_over_and_under_closing() {
    let query = GetUserQuery {
        id: Some(4),
        ..Default::default()
    };
    let mut criteria = FilterCriteria::<UserProjection, _>::new(&query);
    let cursor = criteria
        .root()
        .close_group()
        .close_group()
        .or_group()
        .and_group()
        .add_criterion(UserProjection::ID, |q| q.id, Operator::Equal)
        .unwrap();

    assert_ne!(cursor.id(), GroupId::ROOT);
    assert_eq!(FilterConverters::new().to_sql(&criteria, "").unwrap(), "Id = 4");
}

#[test]
fn test_compile_is_repeatable_and_shareable() {
    let query = GetUserQuery {
        id: Some(1),
        statuses: Some(vec![1, 3]),
        ..Default::default()
    };
    let criteria = sample_criteria(&query);
    let converters = FilterConverters::new();

    let first = converters.to_sql(&criteria, "").unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| converters.to_sql(&criteria, "").unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), first);
        }
    });
}

#[test]
fn test_literal_values_from_json() {
    let statuses: FilterValue = serde_json::from_str(
        r#"{"type": "list", "value": [{"type": "int", "value": 1}, {"type": "int", "value": 3}]}"#,
    )
    .unwrap();
    assert_eq!(
        statuses,
        FilterValue::List(vec![FilterValue::Int(1), FilterValue::Int(3)])
    );

    let mut criteria = FilterCriteria::<UserProjection, ()>::new(&());
    criteria
        .root()
        .add_criterion_value(UserProjection::STATUS, statuses, Operator::In)
        .unwrap();

    let converters = FilterConverters::new();
    assert_eq!(converters.to_sql(&criteria, "").unwrap(), "Status IN (1, 3)");

    let predicate = converters.to_predicate(&criteria, "x").unwrap();
    let ids: Vec<i64> = predicate.filter(&users()).map(|u| u.id).collect();
    assert_eq!(ids, vec![1, 2, 4, 5]);
}

#[test]
fn test_numeric_text_from_json_stays_text() {
    let name: FilterValue = serde_json::from_str(r#"{"type": "string", "value": "42"}"#).unwrap();
    assert_eq!(name, FilterValue::String("42".into()));

    let mut criteria = FilterCriteria::<UserProjection, ()>::new(&());
    criteria
        .root()
        .add_criterion_value(UserProjection::LAST_NAME, name, Operator::Contains)
        .unwrap();

    let converters = FilterConverters::new();
    assert_eq!(converters.to_sql(&criteria, "").unwrap(), "LastName LIKE '%42%'");
    assert_eq!(converters.to_predicate(&criteria, "x").unwrap().filter(&users()).count(), 0);
}
