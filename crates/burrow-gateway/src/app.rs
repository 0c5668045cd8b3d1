use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, health_handler, index_handler,
    inspect_link_handler, new_link_form_handler, redirect_handler, result_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/", get(index_handler))
            .route("/health", get(health_handler))
            .route("/healthz", get(health_handler))
            .route("/new", post(new_link_form_handler))
            .route("/u/{id}", get(redirect_handler))
            .route("/result/{id}", get(result_handler))
            .nest(
                "/v1/links",
                Router::new()
                    .route("/", post(create_link_handler))
                    .route("/{id}", get(get_link_handler).delete(delete_link_handler))
                    .route("/{id}/admin", post(inspect_link_handler)),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
