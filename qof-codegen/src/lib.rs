//! Procedural macros for qof.
//!
//! # Macros
//!
//! - [`Reflect`] - Derive property descriptors for a source or filter type
//!
//! # Example
//!
//! ```rust,ignore
//! #[derive(qof::Reflect)]
//! struct User {
//!     id: i64,
//!     email: String,
//!     #[qof(rename = "AdName")]
//!     active_directory_name: Option<String>,
//!     #[qof(collection)]
//!     logins: Vec<Login>,
//!     #[qof(skip)]
//!     password_hash: Vec<u8>,
//! }
//!
//! // Generated: User::ID, User::EMAIL, User::ACTIVE_DIRECTORY_NAME, User::LOGINS
//! // and `impl qof::Reflect for User`.
//! ```

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod generators;

/// Derive macro implementing `Reflect` for a struct with named fields.
///
/// Every field becomes an associated `Property` constant named after the
/// field in `UPPER_SNAKE_CASE`. The property name seen by criteria is the
/// field name in `PascalCase` unless renamed.
///
/// # Attributes
///
/// ## Struct-level
/// - `#[qof(rename_all = "...")]` - Naming convention for property names
///   (`PascalCase`, `camelCase`, `snake_case`, `SCREAMING_SNAKE_CASE`)
/// - `#[qof(crate = "path")]` - Path to the crate exporting `Reflect`
///   (defaults to `::qof`)
///
/// ## Field-level
/// - `#[qof(rename = "Name")]` - Property name for this field
/// - `#[qof(skip)]` - Generate nothing for this field
/// - `#[qof(collection)]` - A `Vec<E>` field becomes a `CollectionProperty`
///   with elements `E` instead of a scalar property
#[proc_macro_derive(Reflect, attributes(qof))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generators::derive_reflect_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
