//! Backend selection. Exactly one of the `postgres`/`sqlite` features picks
//! the concrete sqlx database; everything else in the crate is written
//! against these aliases. When both features are enabled, `postgres` wins so
//! that a downstream crate can switch backends without juggling
//! `default-features`.

#[cfg(not(any(feature = "postgres", feature = "sqlite")))]
compile_error!("one of the `postgres` or `sqlite` features must be enabled");

#[cfg(feature = "postgres")]
pub type Db = sqlx::Postgres;

#[cfg(all(feature = "sqlite", not(feature = "postgres")))]
pub type Db = sqlx::Sqlite;

pub type DbPool = sqlx::Pool<Db>;

pub type DbRow = <Db as sqlx::Database>::Row;

pub type DbQuery<'q> = sqlx::query::Query<'q, Db, <Db as sqlx::Database>::Arguments<'q>>;
