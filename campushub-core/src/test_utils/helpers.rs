// File: campushub-core/src/test_utils/helpers.rs

use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, PgConnection, Pool, Postgres};

use crate::db::Database;
use crate::Error;

/// Create the test database if it does not exist yet.
pub async fn ensure_test_database_exists() -> Result<(), Error> {
    let admin_url = std::env::var("DATABASE_ADMIN_URL")
        .unwrap_or_else(|_| "postgres://campushub@localhost/postgres".to_string());

    let mut conn = PgConnection::connect(&admin_url).await?;

    let test_db = "campushub_test";

    // CREATE DATABASE IF NOT EXISTS is non-standard; try and ignore the
    // duplicate_database error instead.
    let create_db_sql = format!("CREATE DATABASE {test_db};");
    match sqlx::query(&create_db_sql).execute(&mut conn).await {
        Ok(_) => {}
        Err(e) => {
            let is_duplicate = e
                .as_database_error()
                .and_then(|db_err| db_err.code())
                .map(|code| code == "42P04")
                .unwrap_or(false);
            if !is_duplicate {
                return Err(Error::Database(e));
            }
        }
    }

    Ok(())
}

/// Create a connection pool to the test DB.
/// By default looks for `TEST_DATABASE_URL` in env,
/// else uses `postgres://campushub@localhost/campushub_test`.
pub async fn create_test_db_pool() -> Result<Pool<Postgres>, Error> {
    let url = std::env::var("TEST_DATABASE_URL")
        .unwrap_or_else(|_| "postgres://campushub@localhost/campushub_test".to_string());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await?;

    Ok(pool)
}

/// Wipes out test data so each test can start fresh.
pub async fn clean_database(pool: &Pool<Postgres>) -> Result<(), Error> {
    sqlx::query(
        r#"
        TRUNCATE TABLE
            users,
            gifts,
            gift_verifications,
            feedback,
            forums,
            forum_comments,
            forum_likes,
            forum_comment_likes,
            events,
            stores,
            app_config
        RESTART IDENTITY CASCADE;
    "#,
    )
        .execute(pool)
        .await?;

    Ok(())
}

/// Returns a migrated, empty test DB handle.
pub async fn setup_test_database() -> Result<Database, Error> {
    ensure_test_database_exists().await?;

    let pool = create_test_db_pool().await?;
    let db = Database::from_pool(pool);
    db.migrate().await?;
    clean_database(db.pool()).await?;

    Ok(db)
}
