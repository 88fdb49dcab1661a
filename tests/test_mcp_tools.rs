mod common;

use std::sync::Arc;

use mcp_fatsecret::client::Localization;
use mcp_fatsecret::server::{
    GetFoodCategoriesParams, GetFoodParams, GetRecipeParams, SearchFoodsParams,
};
use mcp_fatsecret::FatsecretMcpServer;
use pretty_assertions::assert_eq;
use rmcp::handler::server::tool::Parameters;
use rmcp::model::CallToolResult;
use rmcp::ServerHandler;
use serde_json::Value;

const BRANDED_BREAD: &str = include_str!("fixtures/food_1844450.json");
const SEARCH_PAGE: &str = include_str!("fixtures/foods_search_page.json");
const CATEGORIES: &str = include_str!("fixtures/food_categories.json");
const RECIPE_FULL: &str = include_str!("fixtures/recipe_full.json");
const RECIPE_SINGLE_SHAPES: &str = include_str!("fixtures/recipe_single_shapes.json");
const API_ERROR: &str = include_str!("fixtures/error_invalid_signature.json");

/// Error flag and parsed JSON text of a tool result.
fn tool_output(result: CallToolResult) -> (bool, Value) {
    let raw = serde_json::to_value(&result).unwrap();
    let is_error = raw["isError"].as_bool().unwrap_or(false);
    let text = raw["content"][0]["text"]
        .as_str()
        .expect("tool result should carry text content");
    (is_error, serde_json::from_str(text).unwrap())
}

fn server_with(
    body: &str,
    defaults: Localization,
) -> (FatsecretMcpServer, Arc<common::FixtureTransport>) {
    let (client, transport) = common::fixture_client(body);
    (FatsecretMcpServer::with_defaults(client, defaults), transport)
}

#[tokio::test]
async fn test_mcp_server_initialization() {
    common::init_test_logging();
    let (server, transport) = server_with("{}", Localization::default());

    let info = server.get_info();
    let instructions = info.instructions.expect("server should describe itself");
    assert!(instructions.contains("FatSecret"));

    // building the server must not touch the API
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_default_localization_reaches_request() {
    let (server, transport) = server_with(
        CATEGORIES,
        Localization::new(Some("GB".to_string()), Some("en".to_string())),
    );

    let result = server
        .get_food_categories(Parameters(GetFoodCategoriesParams {
            region: None,
            language: None,
        }))
        .await
        .unwrap();

    let (is_error, value) = tool_output(result);
    assert!(!is_error);
    assert_eq!(value["total_count"], 3);

    let url = transport.last_url();
    assert_eq!(common::query_param(&url, "region").as_deref(), Some("GB"));
    assert_eq!(common::query_param(&url, "language").as_deref(), Some("en"));
}

#[tokio::test]
async fn test_call_localization_overrides_defaults() {
    let (server, transport) = server_with(
        SEARCH_PAGE,
        Localization::new(Some("GB".to_string()), Some("en".to_string())),
    );

    server
        .search_foods(Parameters(SearchFoodsParams {
            query: "toast".to_string(),
            page_number: None,
            region: Some("FR".to_string()),
            language: None,
        }))
        .await
        .unwrap();

    let url = transport.last_url();
    assert_eq!(common::query_param(&url, "region").as_deref(), Some("FR"));
    assert_eq!(common::query_param(&url, "language").as_deref(), Some("en"));
    assert_eq!(common::query_param(&url, "page_number").as_deref(), Some("0"));
}

#[tokio::test]
async fn test_search_foods_reports_has_more() {
    let (server, _) = server_with(SEARCH_PAGE, Localization::default());

    let result = server
        .search_foods(Parameters(SearchFoodsParams {
            query: "toast".to_string(),
            page_number: Some(0),
            region: None,
            language: None,
        }))
        .await
        .unwrap();

    let (is_error, value) = tool_output(result);
    assert!(!is_error);
    assert_eq!(value["total_results"], 120);
    assert_eq!(value["has_more"], true);
    assert_eq!(value["foods"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_api_error_becomes_error_result() {
    let (server, _) = server_with(API_ERROR, Localization::default());

    let result = server
        .get_food(Parameters(GetFoodParams {
            food_id: 1,
            region: None,
            language: None,
            include_sub_categories: false,
            include_categories: false,
        }))
        .await
        .expect("API failures are reported inside the tool result");

    let (is_error, value) = tool_output(result);
    assert!(is_error);
    assert_eq!(value["error"], "Failed to get food");
    assert!(value["details"].as_str().is_some_and(|d| !d.is_empty()));
}

#[tokio::test]
async fn test_get_food_with_categories() {
    let (server, transport) = server_with(BRANDED_BREAD, Localization::default());

    let result = server
        .get_food(Parameters(GetFoodParams {
            food_id: 1844450,
            region: None,
            language: None,
            include_sub_categories: true,
            include_categories: true,
        }))
        .await
        .unwrap();

    let (is_error, value) = tool_output(result);
    assert!(!is_error);
    assert_eq!(value["name"], "21 Whole Grains and Seeds Bread");
    assert_eq!(value["food_categories"][0]["name"], "Baked Products");
    assert_eq!(
        common::query_param(&transport.last_url(), "include_sub_categories").as_deref(),
        Some("true")
    );
}

#[tokio::test]
async fn test_get_food_without_categories() {
    let (server, _) = server_with(BRANDED_BREAD, Localization::default());

    let result = server
        .get_food(Parameters(GetFoodParams {
            food_id: 1844450,
            region: None,
            language: None,
            include_sub_categories: false,
            include_categories: false,
        }))
        .await
        .unwrap();

    let (_, value) = tool_output(result);
    assert!(value.get("food_categories").is_none());
}

#[tokio::test]
async fn test_recipe_total_time() {
    let (server, _) = server_with(RECIPE_FULL, Localization::default());
    let result = server
        .get_recipe(Parameters(GetRecipeParams { recipe_id: 91 }))
        .await
        .unwrap();
    let (_, value) = tool_output(result);
    assert_eq!(value["total_time"], 30);

    // cooking time is unknown, so the total is too
    let (server, _) = server_with(RECIPE_SINGLE_SHAPES, Localization::default());
    let result = server
        .get_recipe(Parameters(GetRecipeParams { recipe_id: 4422 }))
        .await
        .unwrap();
    let (_, value) = tool_output(result);
    assert_eq!(value["preparation_time"], 5);
    assert!(value["total_time"].is_null());
}

#[tokio::test]
async fn test_mcp_server_is_cloneable_across_tasks() {
    let (client, _) = common::fixture_client("{}");
    let server = FatsecretMcpServer::new(client);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let server = server.clone();
            tokio::spawn(async move { server.get_info().instructions.is_some() })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap());
    }
}
