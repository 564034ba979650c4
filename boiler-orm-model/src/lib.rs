mod crud;
mod db;
mod entity;
mod errors;
mod key;
pub mod statement;

pub use crate::crud::{Crud, PagingInfo};
pub use crate::db::{Db, DbPool, DbQuery, DbRow};
pub use crate::entity::{Entity, EntityMeta};
pub use crate::errors::BoilerOrmError;
pub use crate::key::{Key, KeyKind};
