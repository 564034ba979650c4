//! boiler-orm is a small reflective CRUD layer on top of [sqlx].
//!
//! Annotate a struct with the `Entity` derive and the library knows its
//! table, its primary key and its column order. From that it renders exact
//! PostgreSQL-style statements with `$N` placeholders and executes them
//! through a shared pool.
//!
//! ```rust
//! use boiler_orm::{statement, Entity};
//!
//! #[derive(Debug, Default, Entity)]
//! #[boiler_orm(table_name = "users")]
//! struct User {
//!     id: String,
//!     name: String,
//!     email: String,
//! }
//!
//! assert_eq!(
//!     statement::insert::<User>(),
//!     "INSERT INTO users(name, email) VALUES($1, $2) RETURNING id"
//! );
//! assert_eq!(
//!     statement::update::<User>(),
//!     "UPDATE users SET name = $2, email = $3 WHERE id = $1"
//! );
//! assert_eq!(
//!     statement::get_by_id::<User>(),
//!     "SELECT name, email FROM users WHERE id = $1"
//! );
//! ```
//!
//! Execution goes through [`Crud`], which owns nothing but a pool:
//!
//! ```rust,ignore
//! let crud = Crud::new(pool);
//!
//! let mut user = User {
//!     name: "Ada".to_string(),
//!     email: "ada@example.com".to_string(),
//!     ..Default::default()
//! };
//! crud.save(&mut user).await?; // transient, so INSERT; the key comes back filled in
//!
//! user.email = "ada@lovelace.dev".to_string();
//! crud.save(&mut user).await?; // persisted, so UPDATE
//!
//! let mut found = User::default();
//! crud.get_by_id(&mut found, user.key()).await?;
//! ```
//!
//! ## Options
//! The Entity derive takes its options under the `boiler_orm` attribute.
//!
//! ### At the struct level
//! - **table_name**: The name of the table in the database.
//!   Default being a snake_case version of the struct name. So `MyStruct`
//!   would have `my_struct` as a default `table_name`.
//!
//! ### At the field level
//! - **primary_key**: Marks the field as the primary key. Without it, a
//!   field named `id` is the primary key by default.
//! - **column**: The column this field maps to, when it differs from the
//!   field name.
//! - **skip**: Excludes the field from every statement. A skipped field
//!   never participates in placeholder numbering.
//!
//! ## Primary key types
//! String, signed integer and unsigned integer fields can be primary keys;
//! anything else is rejected when the derive expands. At runtime keys
//! travel as [`Key`], and every operation checks the key variant against
//! the entity's declared kind before touching the database.
//!
//! A saved entity is *transient* while its key is the zero value (empty
//! string or numeric zero) and *persisted* once a key is set; `save`
//! dispatches between INSERT and UPDATE on exactly that distinction.
//!
//! ## Feature flags
//! - `sqlite` (default): run against SQLite, which accepts the same `$N`
//!   placeholders and RETURNING clause.
//! - `postgres`: run against PostgreSQL.

pub use boiler_orm_macros::*;
pub use boiler_orm_model::*;
