#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Server is up", body = String)
    ),
    tag = "Health",
)]
pub async fn healthz_handler() -> &'static str {
    "ok"
}
