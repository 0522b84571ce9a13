use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;

use crate::{
    routes::{generate::generate_handler, health::healthz_handler},
    AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(description = "Kubernetes manifest generator"),
    paths(
        crate::routes::generate::generate_handler,
        crate::routes::health::healthz_handler
    )
)]
struct ApiDoc;

pub(crate) fn build_router(app: Arc<AppState>) -> Router {
    let body_limit = app.config.max_body_bytes;

    Router::new()
        .route("/generate", post(generate_handler))
        .route("/healthz", get(healthz_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(app)
        .merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger")
                .url("/api/openapi.json", ApiDoc::openapi()),
        )
}
