// campushub-server/src/main.rs

use clap::Parser;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use campushub_core::Database;

mod error;
mod routes;
mod state;

use state::AppState;

#[derive(Parser, Debug, Clone)]
#[command(name = "campushub")]
#[command(author, version, about = "CampusHub - student association backend")]
struct Args {
    /// Address to which the server will bind
    #[arg(long, default_value = "0.0.0.0:8080")]
    server_addr: String,

    /// Postgres connection URL.
    #[arg(long, default_value = "postgres://campushub@localhost:5432/campushub")]
    db_path: String,
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("campushub=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub)
        .expect("Failed to set global subscriber");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_tracing();
    let args = Args::parse();
    info!("CampusHub starting. addr={}", args.server_addr);

    let db = Database::new(&args.db_path).await?;
    db.migrate().await?;

    let state = AppState::new(db.pool().clone());
    let app = routes::router(state);

    let addr: SocketAddr = args.server_addr.parse()?;
    info!("HTTP API listening on http://{}", addr);

    axum_server::Server::bind(addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
