//! Filters a small user list with one criteria tree, in memory and as query text.
//!
//! ```bash
//! cargo run --example users
//!
//! # See builder and compiler events
//! QOF_LOG_LEVEL=debug QOF_LOG_FORMAT=pretty cargo run --example users
//! ```

use qof::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Reflect)]
struct LoginData {
    login_provider_name: String,
    login_value: String,
}

#[derive(Debug, Clone, Reflect)]
struct UserProjection {
    id: i64,
    email: String,
    last_name: String,
    first_name: String,
    middle_name: String,
    active_directory_name: String,
    status: i32,
    #[qof(collection)]
    logins: Vec<LoginData>,
}

#[derive(Debug, Default)]
struct GetUserQuery {
    id: Option<i64>,
    email: Option<String>,
    name: Option<String>,
    active_directory_name: Option<String>,
    login: Option<String>,
    login_provider_name: Option<String>,
    statuses: Option<Vec<i32>>,
}

fn user(
    id: i64,
    (last_name, first_name, middle_name): (&str, &str, &str),
    provider: &str,
    status: i32,
) -> UserProjection {
    UserProjection {
        id,
        email: format!("u{}@user.com", id),
        last_name: last_name.into(),
        first_name: first_name.into(),
        middle_name: middle_name.into(),
        active_directory_name: format!("u{}", id),
        status,
        logins: vec![LoginData {
            login_provider_name: provider.into(),
            login_value: format!("u{}", id),
        }],
    }
}

fn init_tracing() {
    let level = qof::get_log_level();
    let filter = EnvFilter::try_new(format!(
        "qof={},qof_query={},qof_sql={},qof_predicate={}",
        level, level, level, level
    ))
    .unwrap_or_else(|_| EnvFilter::new("warn"));

    match qof::get_log_format() {
        "pretty" => tracing_subscriber::fmt().with_env_filter(filter).pretty().init(),
        "compact" => tracing_subscriber::fmt().with_env_filter(filter).compact().init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).json().init(),
    }
}

fn main() -> Result<(), qof::QueryError> {
    init_tracing();

    let users = vec![
        user(1, ("Ivanov", "Ivan", "Ivanovich"), "IS1", 1),
        user(2, ("Petrov", "Petr", "Petrovich"), "IS2", 1),
        user(3, ("Sidorov", "Sergey", "Sergeevich"), "IS1", 2),
        user(4, ("Popov", "Nikolay", "Nikolaevich"), "IS2", 1),
        user(5, ("Sokolov", "Ivan", "Ivanovich"), "IS1", 3),
    ];

    let query = GetUserQuery {
        id: Some(1),
        login: Some("u3".into()),
        login_provider_name: Some("IS1".into()),
        statuses: Some(vec![1, 2, 3]),
        ..Default::default()
    };

    let mut criteria = FilterCriteria::<UserProjection, _>::new(&query);
    criteria
        .and_group()
        .add_criterion(UserProjection::ID, |q| q.id, Operator::GreaterThan)?
        .add_criterion(UserProjection::EMAIL, |q| &q.email, Operator::Equal)?
        .or_group()
        .add_criterion(UserProjection::LAST_NAME, |q| &q.name, Operator::StartsWith)?
        .add_criterion(UserProjection::FIRST_NAME, |q| &q.name, Operator::Contains)?
        .add_criterion(UserProjection::MIDDLE_NAME, |q| &q.name, Operator::Contains)?
        .close_group()
        .add_criterion(
            UserProjection::ACTIVE_DIRECTORY_NAME,
            |q| &q.active_directory_name,
            Operator::Equal,
        )?
        .or_group()
        .add_collection_criterion(
            UserProjection::LOGINS,
            LoginData::LOGIN_VALUE,
            |q| &q.login,
            Operator::Equal,
        )?
        .add_collection_criterion(
            UserProjection::LOGINS,
            LoginData::LOGIN_PROVIDER_NAME,
            |q| &q.login_provider_name,
            Operator::Equal,
        )?
        .close_group()
        .add_criterion(UserProjection::STATUS, |q| &q.statuses, Operator::In)?;

    let converters = FilterConverters::new();

    let predicate = converters.to_predicate(&criteria, "x")?;
    println!("predicate: {:?}", predicate);
    for user in predicate.filter(&users) {
        println!(
            "  matched #{} {} {} ({})",
            user.id, user.first_name, user.last_name, user.email
        );
    }

    let sql = converters.to_sql(&criteria, "")?;
    println!("WHERE {}", sql);

    Ok(())
}
