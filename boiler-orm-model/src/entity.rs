use crate::db::{DbQuery, DbRow};
use crate::errors::BoilerOrmError;
use crate::key::{Key, KeyKind};

/// Static mapping metadata for an entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityMeta {
    pub table_name: &'static str,
    pub primary_key: &'static str,
}

/// The contract every database-mapped struct satisfies. Implemented by
/// `#[derive(Entity)]`; the derive fixes the column order from field
/// declaration order, so `columns()` returns the same ordered list on every
/// call and that order governs placeholder numbering everywhere.
pub trait Entity {
    /// Table name and primary key column for this entity type.
    fn meta() -> EntityMeta;

    /// The representation of the primary key field.
    fn key_kind() -> KeyKind;

    /// Ordered non-key column names, in field declaration order. The
    /// primary key is never part of this list; skipped fields are absent.
    fn columns() -> &'static [&'static str];

    /// The current primary key value.
    fn key(&self) -> Key;

    /// Writes a key into the primary key field. Fails with `TypeMismatch`
    /// on a wrong variant and `KeyOutOfRange` when the value does not fit
    /// the declared field.
    fn set_key(&mut self, key: Key) -> Result<(), BoilerOrmError>;

    /// Binds the non-key field values onto `query`, in column order.
    fn bind_columns<'q>(&'q self, query: DbQuery<'q>) -> DbQuery<'q>;

    /// Reads the non-key columns of `row` into the entity's fields.
    fn read_columns(&mut self, row: &DbRow) -> Result<(), sqlx::Error>;

    /// True while the entity has not been persisted, i.e. its primary key
    /// is still at the zero value. `Crud::save` branches on this: transient
    /// entities are INSERTed, persisted ones are UPDATEd.
    fn is_transient(&self) -> bool {
        self.key().is_zero()
    }
}
