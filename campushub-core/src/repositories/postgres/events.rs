// src/repositories/postgres/events.rs

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use campushub_common::models::CampusEvent;
use campushub_common::traits::repository_traits::EventRepository;
use crate::Error;

#[derive(Clone)]
pub struct PostgresEventRepository {
    pub pool: Pool<Postgres>,
}

impl PostgresEventRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepository {
    async fn create_event(&self, event: &CampusEvent) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO events (
                event_id, title, description, start_date, end_date,
                registration_required, picture, address, max_attendees,
                current_attendees, priority, phone_number, category, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
            .bind(event.event_id)
            .bind(&event.title)
            .bind(&event.description)
            .bind(event.start_date)
            .bind(event.end_date)
            .bind(event.registration_required)
            .bind(&event.picture)
            .bind(&event.address)
            .bind(event.max_attendees)
            .bind(event.current_attendees)
            .bind(event.priority)
            .bind(&event.phone_number)
            .bind(&event.category)
            .bind(event.created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get_event(&self, event_id: Uuid) -> Result<Option<CampusEvent>, Error> {
        let row = sqlx::query_as::<_, CampusEvent>(
            r#"
            SELECT event_id, title, description, start_date, end_date,
                   registration_required, picture, address, max_attendees,
                   current_attendees, priority, phone_number, category, created_at
            FROM events
            WHERE event_id = $1
            "#,
        )
            .bind(event_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_events(&self) -> Result<Vec<CampusEvent>, Error> {
        // Highest priority first, then soonest start.
        let rows = sqlx::query_as::<_, CampusEvent>(
            r#"
            SELECT event_id, title, description, start_date, end_date,
                   registration_required, picture, address, max_attendees,
                   current_attendees, priority, phone_number, category, created_at
            FROM events
            ORDER BY priority DESC, start_date ASC
            "#,
        )
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update_event(&self, event: &CampusEvent) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE events
            SET title = $2,
                description = $3,
                start_date = $4,
                end_date = $5,
                registration_required = $6,
                picture = $7,
                address = $8,
                max_attendees = $9,
                current_attendees = $10,
                priority = $11,
                phone_number = $12,
                category = $13
            WHERE event_id = $1
            "#,
        )
            .bind(event.event_id)
            .bind(&event.title)
            .bind(&event.description)
            .bind(event.start_date)
            .bind(event.end_date)
            .bind(event.registration_required)
            .bind(&event.picture)
            .bind(&event.address)
            .bind(event.max_attendees)
            .bind(event.current_attendees)
            .bind(event.priority)
            .bind(&event.phone_number)
            .bind(&event.category)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_event(&self, event_id: Uuid) -> Result<(), Error> {
        sqlx::query("DELETE FROM events WHERE event_id = $1")
            .bind(event_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
