//! SQL text generation. Every function here is pure: given an entity type's
//! metadata and column list it renders a PostgreSQL-style statement with
//! positional `$N` placeholders. Placeholder numbering follows the column
//! order reported by [`Entity::columns`], so statement text and argument
//! list stay in lock-step as long as both come from the same entity type.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::entity::Entity;

static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$([0-9]+)").unwrap());

/// Comma-joined non-key column list, e.g. `"name, email, date_created"`.
pub fn column_list_string<E: Entity>() -> String {
    E::columns().join(", ")
}

/// `INSERT INTO t(c1, c2) VALUES($1, $2) RETURNING pk`
pub fn insert<E: Entity>() -> String {
    let meta = E::meta();
    let columns = E::columns();

    let placeholders = (1..=columns.len())
        .map(|n| format!("${n}"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {}({}) VALUES({}) RETURNING {}",
        meta.table_name,
        columns.join(", "),
        placeholders,
        meta.primary_key
    )
}

/// `UPDATE t SET c1 = $2, c2 = $3 WHERE pk = $1`
///
/// `$1` is reserved for the primary key, bound first at execution time;
/// the SET-list placeholders start at 2 and follow column order.
pub fn update<E: Entity>() -> String {
    let meta = E::meta();

    let assignments = E::columns()
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{} = ${}", column, i + 2))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "UPDATE {} SET {} WHERE {} = $1",
        meta.table_name, assignments, meta.primary_key
    )
}

/// `DELETE FROM t WHERE pk = $1`
pub fn delete_by_id<E: Entity>() -> String {
    let meta = E::meta();
    format!(
        "DELETE FROM {} WHERE {} = $1",
        meta.table_name, meta.primary_key
    )
}

/// `SELECT c1, c2 FROM t WHERE pk = $1`
///
/// The primary key is excluded from the select list; the caller already
/// holds the id it queried with.
pub fn get_by_id<E: Entity>() -> String {
    let meta = E::meta();
    format!(
        "SELECT {} FROM {} WHERE {} = $1",
        column_list_string::<E>(),
        meta.table_name,
        meta.primary_key
    )
}

/// `SELECT pk, c1, c2 FROM t [WHERE ...] ORDER BY $1 LIMIT $2 OFFSET $3`
///
/// `$1`-`$3` are reserved for the paging arguments, so every `$N` token in
/// `where_clause` is renumbered by adding 3; the caller then appends its
/// WHERE-clause arguments after the three paging arguments and its intended
/// binding order is preserved. All other text in the clause is left
/// untouched.
pub fn get_all<E: Entity>(where_clause: &str) -> String {
    let meta = E::meta();

    let mut sql = format!(
        "SELECT {}, {} FROM {} ",
        meta.primary_key,
        column_list_string::<E>(),
        meta.table_name
    );

    if !where_clause.trim().is_empty() {
        let shifted = PLACEHOLDER_REGEX.replace_all(where_clause, |caps: &Captures<'_>| {
            // convert "email = $1" to "email = $4"
            let number = caps[1].parse::<u64>().unwrap_or(0);
            format!("${}", number + 3)
        });
        sql.push_str("WHERE ");
        sql.push_str(&shifted);
        sql.push(' ');
    }

    sql.push_str("ORDER BY $1 LIMIT $2 OFFSET $3");
    sql
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DbQuery, DbRow};
    use crate::entity::EntityMeta;
    use crate::errors::BoilerOrmError;
    use crate::key::{Key, KeyKind};

    const USER_COLUMNS: &[&str] = &[
        "name",
        "email",
        "hashed_password",
        "auth_token",
        "is_admin",
        "is_service",
        "date_created",
    ];

    #[derive(Default)]
    struct UserEntity {
        id: String,
    }

    impl Entity for UserEntity {
        fn meta() -> EntityMeta {
            EntityMeta {
                table_name: "users",
                primary_key: "id",
            }
        }

        fn key_kind() -> KeyKind {
            KeyKind::Text
        }

        fn columns() -> &'static [&'static str] {
            USER_COLUMNS
        }

        fn key(&self) -> Key {
            Key::Text(self.id.clone())
        }

        fn set_key(&mut self, key: Key) -> Result<(), BoilerOrmError> {
            match key {
                Key::Text(value) => {
                    self.id = value;
                    Ok(())
                }
                other => Err(BoilerOrmError::TypeMismatch {
                    expected: KeyKind::Text,
                    got: other.kind(),
                }),
            }
        }

        fn bind_columns<'q>(&'q self, query: DbQuery<'q>) -> DbQuery<'q> {
            query
        }

        fn read_columns(&mut self, _row: &DbRow) -> Result<(), sqlx::Error> {
            Ok(())
        }
    }

    struct TweetEntity;

    impl Entity for TweetEntity {
        fn meta() -> EntityMeta {
            EntityMeta {
                table_name: "tweets",
                primary_key: "id",
            }
        }

        fn key_kind() -> KeyKind {
            KeyKind::Int
        }

        fn columns() -> &'static [&'static str] {
            &["user_id", "tweet", "is_posted", "date_created"]
        }

        fn key(&self) -> Key {
            Key::Int(0)
        }

        fn set_key(&mut self, _key: Key) -> Result<(), BoilerOrmError> {
            Ok(())
        }

        fn bind_columns<'q>(&'q self, query: DbQuery<'q>) -> DbQuery<'q> {
            query
        }

        fn read_columns(&mut self, _row: &DbRow) -> Result<(), sqlx::Error> {
            Ok(())
        }
    }

    #[test]
    fn test_column_list_string() {
        assert_eq!(
            column_list_string::<UserEntity>(),
            "name, email, hashed_password, auth_token, is_admin, is_service, date_created"
        );
    }

    #[test]
    fn test_column_list_is_deterministic() {
        assert_eq!(UserEntity::columns(), UserEntity::columns());
        assert_eq!(column_list_string::<UserEntity>(), column_list_string::<UserEntity>());
    }

    #[test]
    fn test_insert_statement() {
        assert_eq!(
            insert::<UserEntity>(),
            "INSERT INTO users(name, email, hashed_password, auth_token, is_admin, is_service, \
             date_created) VALUES($1, $2, $3, $4, $5, $6, $7) RETURNING id"
        );
    }

    #[test]
    fn test_insert_placeholder_count() {
        let sql = insert::<UserEntity>();
        for n in 1..=USER_COLUMNS.len() {
            assert!(sql.contains(&format!("${n}")), "missing ${n} in {sql}");
        }
        assert!(!sql.contains(&format!("${}", USER_COLUMNS.len() + 1)));
    }

    #[test]
    fn test_update_statement() {
        assert_eq!(
            update::<UserEntity>(),
            "UPDATE users SET name = $2, email = $3, hashed_password = $4, auth_token = $5, \
             is_admin = $6, is_service = $7, date_created = $8 WHERE id = $1"
        );
    }

    #[test]
    fn test_update_reserves_first_placeholder_for_key() {
        let sql = update::<UserEntity>();
        assert!(sql.ends_with("WHERE id = $1"));
        // SET-list placeholders run from 2 to N+1
        for n in 2..=USER_COLUMNS.len() + 1 {
            assert!(sql.contains(&format!("${n}")), "missing ${n} in {sql}");
        }
    }

    #[test]
    fn test_delete_by_id_statement() {
        assert_eq!(
            delete_by_id::<UserEntity>(),
            "DELETE FROM users WHERE id = $1"
        );
    }

    #[test]
    fn test_get_by_id_statement() {
        assert_eq!(
            get_by_id::<UserEntity>(),
            "SELECT name, email, hashed_password, auth_token, is_admin, is_service, date_created \
             FROM users WHERE id = $1"
        );
    }

    #[test]
    fn test_get_all_statement_without_where() {
        assert_eq!(
            get_all::<UserEntity>(""),
            "SELECT id, name, email, hashed_password, auth_token, is_admin, is_service, \
             date_created FROM users ORDER BY $1 LIMIT $2 OFFSET $3"
        );
    }

    #[test]
    fn test_get_all_statement_with_where() {
        assert_eq!(
            get_all::<UserEntity>("email = $1 AND name LIKE '$2'"),
            "SELECT id, name, email, hashed_password, auth_token, is_admin, is_service, \
             date_created FROM users WHERE email = $4 AND name LIKE '$5' \
             ORDER BY $1 LIMIT $2 OFFSET $3"
        );
    }

    #[test]
    fn test_get_all_blank_where_is_ignored() {
        assert_eq!(get_all::<UserEntity>("   "), get_all::<UserEntity>(""));
    }

    #[test]
    fn test_get_all_renumbers_multi_digit_placeholders() {
        assert_eq!(
            get_all::<TweetEntity>("user_id = $10 OR user_id = $2"),
            "SELECT id, user_id, tweet, is_posted, date_created FROM tweets \
             WHERE user_id = $13 OR user_id = $5 ORDER BY $1 LIMIT $2 OFFSET $3"
        );
    }

    #[test]
    fn test_get_all_leaves_other_text_unchanged() {
        let sql = get_all::<TweetEntity>("tweet LIKE '%100 days%' AND user_id = $1");
        assert!(sql.contains("tweet LIKE '%100 days%' AND user_id = $4"));
    }

    #[test]
    fn test_int_keyed_statements() {
        assert_eq!(
            insert::<TweetEntity>(),
            "INSERT INTO tweets(user_id, tweet, is_posted, date_created) \
             VALUES($1, $2, $3, $4) RETURNING id"
        );
        assert_eq!(
            update::<TweetEntity>(),
            "UPDATE tweets SET user_id = $2, tweet = $3, is_posted = $4, date_created = $5 \
             WHERE id = $1"
        );
    }
}
