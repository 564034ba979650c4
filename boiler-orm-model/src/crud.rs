use sqlx::Row;

use crate::db::{DbPool, DbQuery, DbRow};
use crate::entity::Entity;
use crate::errors::BoilerOrmError;
use crate::key::{Key, KeyKind};
use crate::statement;

/// Paging arguments for [`Crud::get_all`], bound as `$1`-`$3` of the
/// generated statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagingInfo {
    pub order_by: String,
    pub limit: i64,
    pub offset: i64,
}

/// Executes generated statements against a database pool.
///
/// The pool is injected once at construction and shared by reference; the
/// executor itself holds no other state, so a single instance can be used
/// from any number of tasks. Each call is one round trip; there is no
/// caching, no retrying and no coordination between concurrent calls that
/// touch the same row.
#[derive(Debug, Clone)]
pub struct Crud {
    pool: DbPool,
    checked_updates: bool,
}

impl Crud {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            checked_updates: false,
        }
    }

    /// Like [`Crud::new`], but an UPDATE that matches zero rows (the row
    /// was deleted under us) reports `NotFound` instead of succeeding
    /// silently.
    pub fn with_checked_updates(pool: DbPool) -> Self {
        Self {
            pool,
            checked_updates: true,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Loads the entity identified by `id` into `entity`.
    ///
    /// Fails with `TypeMismatch` before issuing any query when the key
    /// variant does not match the entity's declared kind, and with
    /// `NotFound` when no row matches; an id that is merely malformed (e.g.
    /// not a UUID on a text-keyed table) matches nothing and therefore also
    /// reports `NotFound`.
    pub async fn get_by_id<E: Entity>(
        &self,
        entity: &mut E,
        id: Key,
    ) -> Result<(), BoilerOrmError> {
        if id.kind() != E::key_kind() {
            return Err(BoilerOrmError::TypeMismatch {
                expected: E::key_kind(),
                got: id.kind(),
            });
        }

        let sql = statement::get_by_id::<E>();
        let row = bind_key(sqlx::query(&sql), id.clone())?
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                entity.read_columns(&row)?;
                entity.set_key(id)
            }
            None => Err(BoilerOrmError::NotFound),
        }
    }

    /// Saves `entity`: INSERT while it is transient, UPDATE once persisted.
    ///
    /// A successful INSERT scans the returned primary key back into the
    /// entity, flipping it to persisted; a failed INSERT leaves it
    /// transient. UPDATE binds the key as `$1` followed by the non-key
    /// fields in column order and never changes the key.
    pub async fn save<E: Entity>(&self, entity: &mut E) -> Result<(), BoilerOrmError> {
        if entity.is_transient() {
            let sql = statement::insert::<E>();
            let row = entity
                .bind_columns(sqlx::query(&sql))
                .fetch_one(&self.pool)
                .await?;
            let key = read_key(&row, 0, E::key_kind())?;
            entity.set_key(key)
        } else {
            let sql = statement::update::<E>();
            let query = bind_key(sqlx::query(&sql), entity.key())?;
            let result = entity.bind_columns(query).execute(&self.pool).await?;
            if self.checked_updates && result.rows_affected() == 0 {
                return Err(BoilerOrmError::NotFound);
            }
            Ok(())
        }
    }

    /// Deletes the row identified by the entity's current key. The
    /// in-memory entity is left untouched; discarding it is the caller's
    /// responsibility.
    pub async fn delete<E: Entity>(&self, entity: &E) -> Result<(), BoilerOrmError> {
        let sql = statement::delete_by_id::<E>();
        bind_key(sqlx::query(&sql), entity.key())?
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Fetches a page of entities. The key comes back as column 0 of the
    /// generated statement, the remaining columns by name.
    pub async fn get_all<E: Entity + Default>(
        &self,
        paging: &PagingInfo,
    ) -> Result<Vec<E>, BoilerOrmError> {
        let sql = statement::get_all::<E>("");
        let rows = sqlx::query(&sql)
            .bind(paging.order_by.clone())
            .bind(paging.limit)
            .bind(paging.offset)
            .fetch_all(&self.pool)
            .await?;

        let mut entities = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut entity = E::default();
            let key = read_key(row, 0, E::key_kind())?;
            entity.read_columns(row)?;
            entity.set_key(key)?;
            entities.push(entity);
        }

        Ok(entities)
    }
}

/// Binds a key value as the next positional argument. Unsigned keys travel
/// as BIGINT on the wire; a value above `i64::MAX` cannot, and binding it
/// fails with `KeyOutOfRange` before any query executes.
fn bind_key(query: DbQuery<'_>, key: Key) -> Result<DbQuery<'_>, BoilerOrmError> {
    match key {
        Key::Text(value) => Ok(query.bind(value)),
        Key::Int(value) => Ok(query.bind(value)),
        Key::Uint(value) => {
            let value =
                i64::try_from(value).map_err(|_| BoilerOrmError::KeyOutOfRange(value.to_string()))?;
            Ok(query.bind(value))
        }
    }
}

/// Scans a returned primary key by kind dispatch.
fn read_key(row: &DbRow, index: usize, kind: KeyKind) -> Result<Key, BoilerOrmError> {
    match kind {
        KeyKind::Text => Ok(Key::Text(row.try_get(index)?)),
        KeyKind::Int => Ok(Key::Int(row.try_get(index)?)),
        KeyKind::Uint => {
            let value: i64 = row.try_get(index)?;
            let value =
                u64::try_from(value).map_err(|_| BoilerOrmError::KeyOutOfRange(value.to_string()))?;
            Ok(Key::Uint(value))
        }
    }
}
