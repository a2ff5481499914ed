//! Service banner and health endpoint.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::server::AppState;

/// GET /: service banner.
pub async fn root() -> Json<Value> {
    Json(json!({
        "service": "Fission - Business Name Ideation Engine",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "online",
    }))
}

/// GET /api/health: reports whether, and which, generation service is configured.
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "llm_available": state.generator.is_available(),
        "provider": state.generator.provider_name(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::server::tests::make_state;
    use crate::cache::ResponseCache;
    use crate::generator::{GeneratorOptions, NameGenerator};
    use crate::providers::MockLLMProvider;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_root_banner() {
        let Json(body) = root().await;
        assert_eq!(body["status"], "online");
        assert!(body["service"].as_str().unwrap().starts_with("Fission"));
    }

    #[tokio::test]
    async fn test_health_without_provider() {
        let tmp = TempDir::new().unwrap();
        let state = Arc::new(make_state(&tmp));
        let Json(body) = get_health(State(state)).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["llm_available"], false);
        assert!(body["provider"].is_null());
        assert!(body["version"].is_string());
    }

    #[tokio::test]
    async fn test_health_reports_provider_name() {
        let tmp = TempDir::new().unwrap();
        let cache = Arc::new(ResponseCache::open(tmp.path(), 3600).unwrap());
        let mut mock = MockLLMProvider::new();
        mock.expect_name().return_const("anthropic");
        let generator = NameGenerator::new(cache, Some(Arc::new(mock)), GeneratorOptions::default());

        let Json(body) = get_health(State(Arc::new(AppState::new(Arc::new(generator))))).await;
        assert_eq!(body["llm_available"], true);
        assert_eq!(body["provider"], "anthropic");
    }
}
