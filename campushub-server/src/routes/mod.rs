// campushub-server/src/routes/mod.rs

use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod claims;
pub mod events;
pub mod feedback;
pub mod forums;
pub mod gifts;
pub mod settings;
pub mod stores;
pub mod users;

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(users::router())
        .merge(claims::router())
        .merge(gifts::router())
        .merge(events::router())
        .merge(stores::router())
        .merge(feedback::router())
        .merge(forums::router())
        .merge(settings::router())
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
