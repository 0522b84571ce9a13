use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use kubegen_core::GenerateRequest;

use crate::{
    routes::common::{client_error, generate_error, AppError},
    AppState,
};

#[utoipa::path(
    post,
    path = "/generate",
    request_body(
        content = GenerateRequest,
        description = "Exactly one resource to generate, keyed by kind",
        content_type = "application/json",
    ),
    responses(
        (status = 200, description = "Rendered manifest", body = String, content_type = "text/plain"),
        (status = 400, description = "Malformed JSON, or no usable resource in the request"),
        (status = 500, description = "The resource could not be generated")
    ),
    tag = "Generate",
)]
pub async fn generate_handler(
    State(app): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, AppError> {
    let request: GenerateRequest = serde_json::from_slice(&body)
        .map_err(|e| client_error(format!("Error parsing JSON: {e}")))?;

    tracing::debug!(kinds = ?request.populated(), "generate request");

    let result = if app.config.strict_one_of {
        kubegen_core::generate_exclusive(request)
    } else {
        kubegen_core::generate(request)
    };
    let manifest = result.map_err(generate_error)?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        manifest,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, router::build_router};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::json;
    use tower::ServiceExt;

    fn state(strict_one_of: bool) -> Arc<AppState> {
        Arc::new(AppState {
            config: Config {
                strict_one_of,
                ..Config::default()
            },
        })
    }

    async fn post(
        app: Arc<AppState>,
        body: impl Into<Body>,
    ) -> (StatusCode, String, Option<String>) {
        let request = Request::builder()
            .method("POST")
            .uri("/generate")
            .header("content-type", "application/json")
            .body(body.into())
            .expect("request building should succeed");

        let response = build_router(app)
            .oneshot(request)
            .await
            .expect("request should succeed");

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reading should succeed");
        (
            status,
            String::from_utf8(body.to_vec()).expect("response should be valid UTF-8"),
            content_type,
        )
    }

    #[tokio::test]
    async fn namespace_is_rendered_as_text() {
        let payload = json!({ "namespace": { "namespace_name": "test-namespace", "labels": "app=test" } });
        let (status, body, content_type) = post(state(false), payload.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().starts_with("text/plain"));
        let doc: serde_yaml::Value = serde_yaml::from_str(&body).unwrap();
        assert_eq!(doc["kind"].as_str(), Some("Namespace"));
        assert_eq!(doc["metadata"]["labels"]["app"].as_str(), Some("test"));
    }

    #[tokio::test]
    async fn role_returns_two_documents() {
        let payload = json!({ "role": {
            "type": "Role",
            "name": "test-role",
            "namespace": "default",
            "rules": [{ "apiGroups": [""], "resources": ["pods"], "verbs": ["get", "watch", "list"] }],
            "binding": {
                "name": "test-role-binding",
                "namespace": "default",
                "subjects": [{ "kind": "ServiceAccount", "name": "default" }],
            },
        } });
        let (status, body, _) = post(state(false), payload.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("kind: Role\n"));
        assert!(body.contains("kind: RoleBinding\n"));
        assert_eq!(body.lines().filter(|l| *l == "---").count(), 1);
    }

    #[tokio::test]
    async fn malformed_json_is_a_client_error() {
        let body = r#"{"namespace": {"namespace_name": "test", "labels": app=test}}"#;
        let (status, body, _) = post(state(false), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Error parsing JSON"));
    }

    #[tokio::test]
    async fn missing_resource_is_a_client_error() {
        let payload = json!({ "foo": { "bar": "baz" } });
        let (status, body, _) = post(state(false), payload.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("No valid Kubernetes object provided"));
    }

    #[tokio::test]
    async fn generation_failure_is_a_server_error() {
        let payload = json!({ "secret": {
            "secret_name": "s",
            "secret_type": "kubernetes.io/basic-auth",
            "data": {},
        } });
        let (status, body, _) = post(state(false), payload.to_string()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("unsupported secret type"));
    }

    #[tokio::test]
    async fn strict_mode_rejects_several_kinds() {
        let payload = json!({
            "namespace": { "namespace_name": "a" },
            "pvc": { "pvc_name": "b" },
        });

        let (status, body, _) = post(state(false), payload.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("kind: Namespace"));

        let (status, body, _) = post(state(true), payload.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("namespace, pvc"));
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let app = Arc::new(AppState {
            config: Config {
                max_body_bytes: 16,
                ..Config::default()
            },
        });
        let payload = json!({ "namespace": { "namespace_name": "far-too-long-for-the-limit" } });
        let (status, _, _) = post(app, payload.to_string()).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn healthz_answers() {
        let response = build_router(state(false))
            .oneshot(
                Request::builder()
                    .uri("/healthz")
                    .body(Body::empty())
                    .expect("request building should succeed"),
            )
            .await
            .expect("request should succeed");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
