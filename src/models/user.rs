use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use crate::db::TableDef;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
    pub name: String,
}

impl User {
    pub const TABLE: TableDef = TableDef {
        name: "user",
        ddl: r#"
            CREATE TABLE IF NOT EXISTS "user" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                name TEXT NOT NULL
            )
        "#,
    };

    pub async fn find_by_id(db: &SqlitePool, id: i64) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, name
            FROM "user"
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_email(db: &SqlitePool, email: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, name
            FROM "user"
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    /// Inserts a user; the email column is unique, so a duplicate surfaces as
    /// a unique-violation database error.
    pub async fn create(
        db: &SqlitePool,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO "user" (email, name, password_hash)
            VALUES (?1, ?2, ?3)
            RETURNING id, email, password_hash, name
            "#,
        )
        .bind(email)
        .bind(name)
        .bind(password_hash)
        .fetch_one(db)
        .await
    }
}
