// src/repositories/postgres/gift_verifications.rs

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use campushub_common::models::GiftVerification;
use campushub_common::traits::repository_traits::GiftVerificationRepository;
use crate::Error;

#[derive(Clone)]
pub struct PostgresGiftVerificationRepository {
    pub pool: Pool<Postgres>,
}

impl PostgresGiftVerificationRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GiftVerificationRepository for PostgresGiftVerificationRepository {
    async fn insert_if_absent(&self, verification: &GiftVerification) -> Result<bool, Error> {
        // The unique index on claim_code turns concurrent confirms into a
        // single winner; the loser sees rows_affected == 0.
        let res = sqlx::query(
            r#"
            INSERT INTO gift_verifications (
                verification_id, user_id, claim_code, verified_at, verified_by
            )
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (claim_code) DO NOTHING
            "#,
        )
            .bind(verification.verification_id)
            .bind(verification.user_id)
            .bind(&verification.claim_code)
            .bind(verification.verified_at)
            .bind(&verification.verified_by)
            .execute(&self.pool)
            .await?;

        Ok(res.rows_affected() == 1)
    }

    async fn get_by_claim_code(&self, claim_code: &str) -> Result<Option<GiftVerification>, Error> {
        let row = sqlx::query_as::<_, GiftVerification>(
            r#"
            SELECT verification_id, user_id, claim_code, verified_at, verified_by
            FROM gift_verifications
            WHERE claim_code = $1
            "#,
        )
            .bind(claim_code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<GiftVerification>, Error> {
        let rows = sqlx::query_as::<_, GiftVerification>(
            r#"
            SELECT verification_id, user_id, claim_code, verified_at, verified_by
            FROM gift_verifications
            WHERE user_id = $1
            ORDER BY verified_at DESC
            "#,
        )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
