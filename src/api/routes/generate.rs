//! Generation routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::sync::Arc;

use crate::api::server::AppState;
use crate::error::FissionError;
use crate::types::{
    DeeperRequest, DeeperResponse, GenerateRequest, GenerateResponse, SuggestionRequest,
};

use super::error_response;

/// POST /api/generate
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateRequest>,
) -> Response {
    match state.generator.generate(&request).await {
        Ok(generation) => {
            let body = GenerateResponse::new(request.prompt, generation.payload, generation.source);
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => error_response(&e).into_response(),
    }
}

/// POST /api/deeper
pub async fn go_deeper(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DeeperRequest>,
) -> Response {
    match state.generator.go_deeper(&request).await {
        Ok(generation) => {
            let body = DeeperResponse::new(generation.payload, generation.source);
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => error_response(&e).into_response(),
    }
}

/// POST /api/suggest: either request kind, tagged by `type`.
///
/// The body echoes the payload with its `type` tag plus `source`.
pub async fn suggest(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SuggestionRequest>,
) -> Response {
    let generation = match state.generator.dispatch(request).await {
        Ok(generation) => generation,
        Err(e) => return error_response(&e).into_response(),
    };
    match serde_json::to_value(&generation.payload) {
        Ok(mut body) => {
            body["source"] = json!(generation.source);
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => error_response(&FissionError::from(e)).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use crate::api::server::build_router;
    use crate::api::server::tests::{body_json, make_state};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tempfile::TempDir;
    use tower::util::ServiceExt;

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_generate_fallback_response() {
        let tmp = TempDir::new().unwrap();
        let app = build_router(make_state(&tmp));
        let resp = app
            .oneshot(post_json(
                "/api/generate",
                json!({"prompt": "rocket startup", "num_results": 5}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["query"], "rocket startup");
        assert_eq!(body["total_results"], 5);
        assert_eq!(body["names"][0]["name"], "Prometheus");
        assert_eq!(body["source"], "fallback");
        assert_eq!(body["threads"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_prompt() {
        let tmp = TempDir::new().unwrap();
        let app = build_router(make_state(&tmp));
        let resp = app
            .oneshot(post_json("/api/generate", json!({"prompt": " "})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("prompt"));
    }

    #[tokio::test]
    async fn test_generate_rejects_missing_prompt() {
        let tmp = TempDir::new().unwrap();
        let app = build_router(make_state(&tmp));
        let resp = app
            .oneshot(post_json("/api/generate", json!({"num_results": 3})))
            .await
            .unwrap();
        assert!(resp.status().is_client_error());
    }

    #[tokio::test]
    async fn test_deeper_fallback_response() {
        let tmp = TempDir::new().unwrap();
        let app = build_router(make_state(&tmp));
        let resp = app
            .oneshot(post_json("/api/deeper", json!({"name": "Nova"})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["source_name"], "Nova");
        assert_eq!(body["source"], "fallback");
        assert_eq!(body["threads"][2]["names"][0]["name"], "Novaex");
    }

    #[tokio::test]
    async fn test_deeper_rejects_blank_name() {
        let tmp = TempDir::new().unwrap();
        let app = build_router(make_state(&tmp));
        let resp = app
            .oneshot(post_json("/api/deeper", json!({"name": ""})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_suggest_routes_tagged_requests() {
        let tmp = TempDir::new().unwrap();
        let app = build_router(make_state(&tmp));

        let resp = app
            .clone()
            .oneshot(post_json("/api/suggest", json!({"type": "deeper", "name": "Nova"})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["type"], "deeper");
        assert_eq!(body["source_name"], "Nova");
        assert_eq!(body["source"], "fallback");

        let resp = app
            .oneshot(post_json(
                "/api/suggest",
                json!({"type": "generate", "prompt": "rocket", "num_results": 3}),
            ))
            .await
            .unwrap();
        let body = body_json(resp).await;
        assert_eq!(body["type"], "generate");
        assert_eq!(body["names"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_suggest_rejects_invalid_and_untagged_requests() {
        let tmp = TempDir::new().unwrap();
        let app = build_router(make_state(&tmp));

        let resp = app
            .clone()
            .oneshot(post_json("/api/suggest", json!({"type": "generate", "prompt": ""})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let resp = app
            .oneshot(post_json("/api/suggest", json!({"name": "Nova"})))
            .await
            .unwrap();
        assert!(resp.status().is_client_error());
    }
}
