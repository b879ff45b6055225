// src/repositories/postgres/stores.rs

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use campushub_common::models::PartnerStore;
use campushub_common::traits::repository_traits::StoreRepository;
use crate::Error;

#[derive(Clone)]
pub struct PostgresStoreRepository {
    pub pool: Pool<Postgres>,
}

impl PostgresStoreRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreRepository for PostgresStoreRepository {
    async fn create_store(&self, store: &PartnerStore) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO stores (
                store_id, name, picture, address, description,
                phone_number, category, discount, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
            .bind(store.store_id)
            .bind(&store.name)
            .bind(&store.picture)
            .bind(&store.address)
            .bind(&store.description)
            .bind(&store.phone_number)
            .bind(&store.category)
            .bind(&store.discount)
            .bind(store.created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get_store(&self, store_id: Uuid) -> Result<Option<PartnerStore>, Error> {
        let row = sqlx::query_as::<_, PartnerStore>(
            r#"
            SELECT store_id, name, picture, address, description,
                   phone_number, category, discount, created_at
            FROM stores
            WHERE store_id = $1
            "#,
        )
            .bind(store_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_stores(&self) -> Result<Vec<PartnerStore>, Error> {
        let rows = sqlx::query_as::<_, PartnerStore>(
            r#"
            SELECT store_id, name, picture, address, description,
                   phone_number, category, discount, created_at
            FROM stores
            ORDER BY name ASC
            "#,
        )
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update_store(&self, store: &PartnerStore) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE stores
            SET name = $2,
                picture = $3,
                address = $4,
                description = $5,
                phone_number = $6,
                category = $7,
                discount = $8
            WHERE store_id = $1
            "#,
        )
            .bind(store.store_id)
            .bind(&store.name)
            .bind(&store.picture)
            .bind(&store.address)
            .bind(&store.description)
            .bind(&store.phone_number)
            .bind(&store.category)
            .bind(&store.discount)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_store(&self, store_id: Uuid) -> Result<(), Error> {
        sqlx::query("DELETE FROM stores WHERE store_id = $1")
            .bind(store_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
