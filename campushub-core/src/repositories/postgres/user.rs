// src/repositories/postgres/user.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use campushub_common::models::User;
use campushub_common::traits::repository_traits::{ClaimWrite, UserRepository};
use crate::Error;

#[derive(Clone)]
pub struct PostgresUserRepository {
    pub pool: Pool<Postgres>,
}

impl PostgresUserRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn row_to_user(r: &sqlx::postgres::PgRow) -> Result<User, Error> {
    Ok(User {
        user_id: r.try_get("user_id")?,
        first_name: r.try_get("first_name")?,
        last_name: r.try_get("last_name")?,
        email: r.try_get("email")?,
        phone_number: r.try_get("phone_number")?,
        is_active: r.try_get("is_active")?,
        created_at: r.try_get::<DateTime<Utc>, _>("created_at")?,
        has_claimed_gift: r.try_get("has_claimed_gift")?,
        claim_code: r.try_get("claim_code")?,
        claimed_at: r.try_get::<Option<DateTime<Utc>>, _>("claimed_at")?,
    })
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &User) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id, first_name, last_name, email, phone_number,
                is_active, created_at, has_claimed_gift, claim_code, claimed_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
            .bind(user.user_id)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.phone_number)
            .bind(user.is_active)
            .bind(user.created_at)
            .bind(user.has_claimed_gift)
            .bind(&user.claim_code)
            .bind(user.claimed_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get(&self, user_id: Uuid) -> Result<Option<User>, Error> {
        let row = sqlx::query(
            r#"
            SELECT user_id, first_name, last_name, email, phone_number,
                   is_active, created_at, has_claimed_gift, claim_code, claimed_at
            FROM users
            WHERE user_id = $1
            "#,
        )
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(r) = row {
            Ok(Some(row_to_user(&r)?))
        } else {
            Ok(None)
        }
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        let row = sqlx::query(
            r#"
            SELECT user_id, first_name, last_name, email, phone_number,
                   is_active, created_at, has_claimed_gift, claim_code, claimed_at
            FROM users
            WHERE email = $1
            "#,
        )
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(r) = row {
            Ok(Some(row_to_user(&r)?))
        } else {
            Ok(None)
        }
    }

    async fn get_by_claim_code(&self, claim_code: &str) -> Result<Option<User>, Error> {
        // Codes are stored uppercase; matching is exact, not case-folded.
        let row = sqlx::query(
            r#"
            SELECT user_id, first_name, last_name, email, phone_number,
                   is_active, created_at, has_claimed_gift, claim_code, claimed_at
            FROM users
            WHERE claim_code = $1
            "#,
        )
            .bind(claim_code)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(r) = row {
            Ok(Some(row_to_user(&r)?))
        } else {
            Ok(None)
        }
    }

    async fn assign_claim(
        &self,
        user_id: Uuid,
        claim_code: &str,
        claimed_at: DateTime<Utc>,
    ) -> Result<ClaimWrite, Error> {
        // The WHERE clause makes this a no-op on an already-claimed row,
        // and the unique index on claim_code rejects duplicate codes.
        let result = sqlx::query(
            r#"
            UPDATE users
            SET has_claimed_gift = TRUE,
                claim_code = $2,
                claimed_at = $3
            WHERE user_id = $1
              AND has_claimed_gift = FALSE
            "#,
        )
            .bind(user_id)
            .bind(claim_code)
            .bind(claimed_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(res) => {
                if res.rows_affected() == 1 {
                    Ok(ClaimWrite::Applied)
                } else {
                    Ok(ClaimWrite::AlreadyClaimed)
                }
            }
            Err(e) => {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return Ok(ClaimWrite::CodeTaken);
                    }
                }
                Err(Error::Database(e))
            }
        }
    }

    async fn update(&self, user: &User) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE users
            SET first_name = $2,
                last_name = $3,
                email = $4,
                phone_number = $5,
                is_active = $6,
                has_claimed_gift = $7,
                claim_code = $8,
                claimed_at = $9
            WHERE user_id = $1
            "#,
        )
            .bind(user.user_id)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.phone_number)
            .bind(user.is_active)
            .bind(user.has_claimed_gift)
            .bind(&user.claim_code)
            .bind(user.claimed_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, user_id: Uuid) -> Result<(), Error> {
        sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<User>, Error> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, first_name, last_name, email, phone_number,
                   is_active, created_at, has_claimed_gift, claim_code, claimed_at
            FROM users
            ORDER BY created_at ASC
            "#,
        )
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}
