pub mod password_cards;

use std::any::Any;

use axum::{
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use common::types::Health;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, Level};

use crate::errors::JsonApiError;
use crate::state::AppState;

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

fn panic_response(_err: Box<dyn Any + Send + 'static>) -> Response {
    error!("request handler panicked");
    JsonApiError::internal().into_response()
}

/// Build the application router with the password card routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let collection = get(password_cards::list).post(password_cards::create);
    let member = put(password_cards::update).delete(password_cards::delete);

    Router::new()
        .route("/health", get(health))
        .route("/password-cards", collection.clone())
        .route("/password-cards/", collection)
        .route("/password-cards/:id", member.clone())
        .route("/password-cards/:id/", member)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(
                            DefaultMakeSpan::new()
                                .level(Level::INFO)
                                .include_headers(false),
                        )
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .include_headers(false),
                        )
                        .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
                )
                .layer(CatchPanicLayer::custom(panic_response))
                .layer(CorsLayer::very_permissive()),
        )
}
