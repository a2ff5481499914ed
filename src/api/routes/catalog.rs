//! Static catalogue routes.

use axum::Json;
use serde_json::{json, Value};

use crate::generator::prompts::{CATEGORIES, EXAMPLE_PROMPTS};

/// GET /api/categories
pub async fn list_categories() -> Json<Value> {
    Json(json!({ "categories": CATEGORIES }))
}

/// GET /api/examples
pub async fn list_examples() -> Json<Value> {
    Json(json!({ "examples": EXAMPLE_PROMPTS }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_categories() {
        let Json(body) = list_categories().await;
        let categories = body["categories"].as_array().unwrap();
        assert_eq!(categories.len(), 6);
        assert_eq!(categories[0]["id"], "mythology");
        assert_eq!(categories[0]["color"], "#8b5cf6");
    }

    #[tokio::test]
    async fn test_list_examples() {
        let Json(body) = list_examples().await;
        assert_eq!(body["examples"].as_array().unwrap().len(), 8);
        assert_eq!(body["examples"][0], "Hyperion");
    }
}
