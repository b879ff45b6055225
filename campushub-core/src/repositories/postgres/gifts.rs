// src/repositories/postgres/gifts.rs

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use campushub_common::models::Gift;
use campushub_common::traits::repository_traits::GiftRepository;
use crate::Error;

#[derive(Clone)]
pub struct PostgresGiftRepository {
    pub pool: Pool<Postgres>,
}

impl PostgresGiftRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GiftRepository for PostgresGiftRepository {
    async fn create_gift(&self, gift: &Gift) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO gifts (gift_id, name, description, picture, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
            .bind(gift.gift_id)
            .bind(&gift.name)
            .bind(&gift.description)
            .bind(&gift.picture)
            .bind(gift.created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get_gift(&self, gift_id: Uuid) -> Result<Option<Gift>, Error> {
        let row = sqlx::query_as::<_, Gift>(
            r#"
            SELECT gift_id, name, description, picture, created_at
            FROM gifts
            WHERE gift_id = $1
            "#,
        )
            .bind(gift_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_gifts(&self) -> Result<Vec<Gift>, Error> {
        let rows = sqlx::query_as::<_, Gift>(
            r#"
            SELECT gift_id, name, description, picture, created_at
            FROM gifts
            ORDER BY created_at DESC
            "#,
        )
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update_gift(&self, gift: &Gift) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE gifts
            SET name = $2,
                description = $3,
                picture = $4
            WHERE gift_id = $1
            "#,
        )
            .bind(gift.gift_id)
            .bind(&gift.name)
            .bind(&gift.description)
            .bind(&gift.picture)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_gift(&self, gift_id: Uuid) -> Result<(), Error> {
        sqlx::query("DELETE FROM gifts WHERE gift_id = $1")
            .bind(gift_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
