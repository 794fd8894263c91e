//! Shared fixtures for unit tests: a user projection, its logins and a
//! search query, reflected by hand the way `#[derive(Reflect)]` would.

use crate::property::{CollectionProperty, Property, Reflect};
use crate::value::{FilterValue, ValueType};

macro_rules! reflect_fixture {
    ($ty:ident { $($konst:ident => $name:literal : $field:ident : $fty:ty),* $(,)? }) => {
        impl $ty {
            $(
                pub const $konst: Property<$ty> = {
                    fn get(record: &$ty) -> FilterValue {
                        ValueType::to_value(&record.$field)
                    }
                    Property::new($name, <$fty as ValueType>::KIND, get)
                };
            )*
        }

        impl Reflect for $ty {
            const TYPE_NAME: &'static str = stringify!($ty);
            const PROPERTIES: &'static [Property<Self>] = &[$($ty::$konst),*];
        }
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct Login {
    pub login_value: String,
    pub login_provider_name: String,
}

impl Login {
    pub fn new(provider: &str, value: &str) -> Self {
        Self {
            login_value: value.to_string(),
            login_provider_name: provider.to_string(),
        }
    }
}

reflect_fixture!(Login {
    LOGIN_VALUE => "LoginValue": login_value: String,
    LOGIN_PROVIDER_NAME => "LoginProviderName": login_provider_name: String,
});

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub active_directory_name: Option<String>,
    pub status: i32,
    pub logins: Vec<Login>,
}

impl User {
    pub const LOGINS: CollectionProperty<User, Login> = {
        fn items(record: &User) -> &[Login] {
            &record.logins
        }
        CollectionProperty::new("Logins", items)
    };

    pub fn sample(id: i64, email: &str) -> Self {
        Self {
            id,
            email: email.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            active_directory_name: None,
            status: 1,
            logins: Vec::new(),
        }
    }
}

reflect_fixture!(User {
    ID => "Id": id: i64,
    EMAIL => "Email": email: String,
    FIRST_NAME => "FirstName": first_name: String,
    LAST_NAME => "LastName": last_name: String,
    ACTIVE_DIRECTORY_NAME => "ActiveDirectoryName": active_directory_name: Option<String>,
    STATUS => "Status": status: i32,
});

#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    pub id: Option<i64>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub active_directory_name: Option<String>,
    pub status: Option<i32>,
    pub statuses: Option<Vec<i32>>,
    pub login: Option<String>,
    pub login_provider_name: Option<String>,
}

reflect_fixture!(UserQuery {
    Q_ID => "Id": id: Option<i64>,
    Q_EMAIL => "Email": email: Option<String>,
    Q_NAME => "Name": name: Option<String>,
    Q_ACTIVE_DIRECTORY_NAME => "ActiveDirectoryName": active_directory_name: Option<String>,
    Q_STATUS => "Status": status: Option<i32>,
    Q_STATUSES => "Statuses": statuses: Option<Vec<i32>>,
    Q_LOGIN => "Login": login: Option<String>,
    Q_LOGIN_PROVIDER_NAME => "LoginProviderName": login_provider_name: Option<String>,
});
