use axum::http::StatusCode;
use kubegen_core::GenerateError;

pub type AppError = (StatusCode, String);

pub fn app_error<E: std::fmt::Display>(e: E) -> AppError {
    tracing::warn!("internal error: {e}");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

pub fn client_error<E: std::fmt::Display>(e: E) -> AppError {
    tracing::debug!("rejected request: {e}");
    (StatusCode::BAD_REQUEST, e.to_string())
}

/// Caller mistakes map to 400, anything that went wrong while generating to 500.
pub fn generate_error(e: GenerateError) -> AppError {
    if e.is_client_error() {
        client_error(e)
    } else {
        app_error(format!("Error generating manifest: {e}"))
    }
}
