use std::future::Future;
use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::*,
    schemars,
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use serde::Serialize;
use serde_json::json;

use crate::client::{FatsecretClient, FoodGetOptions, Localization};
use crate::config::FatsecretConfig;
use crate::error::FatsecretError;

// Parameter structs for tools
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetFoodParams {
    pub food_id: u64,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub include_sub_categories: bool,
    /// Also return the food categories the food belongs to
    #[serde(default)]
    pub include_categories: bool,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SearchFoodsParams {
    pub query: String,
    /// Zero-based page index
    #[serde(default)]
    pub page_number: Option<u32>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetRecipeParams {
    pub recipe_id: u64,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SearchRecipesParams {
    pub query: String,
    #[serde(default)]
    pub page_number: Option<u32>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetFoodCategoriesParams {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetFoodSubCategoriesParams {
    pub food_category_id: u64,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Clone)]
pub struct FatsecretMcpServer {
    client: Arc<FatsecretClient>,
    defaults: Localization,
    tool_router: ToolRouter<FatsecretMcpServer>,
}

#[tool_router]
impl FatsecretMcpServer {
    pub fn new(client: FatsecretClient) -> Self {
        Self::with_defaults(client, Localization::default())
    }

    /// Server whose tools fall back to `defaults` when a call names no region or language.
    pub fn with_defaults(client: FatsecretClient, defaults: Localization) -> Self {
        Self {
            client: Arc::new(client),
            defaults,
            tool_router: Self::tool_router(),
        }
    }

    pub fn from_config(config: &FatsecretConfig) -> Self {
        Self::with_defaults(
            FatsecretClient::from_config(config),
            Localization::new(config.default_region.clone(), config.default_language.clone()),
        )
    }

    fn localization(&self, region: Option<String>, language: Option<String>) -> Localization {
        Localization::new(
            region.or_else(|| self.defaults.region.clone()),
            language.or_else(|| self.defaults.language.clone()),
        )
    }

    #[tool(description = "Get nutrition facts for a food, including every serving size")]
    pub async fn get_food(
        &self,
        Parameters(params): Parameters<GetFoodParams>,
    ) -> Result<CallToolResult, McpError> {
        let options = FoodGetOptions {
            localization: self.localization(params.region, params.language),
            include_sub_categories: params.include_sub_categories,
        };

        let result = if params.include_categories {
            self.client
                .get_detailed_food(params.food_id, &options)
                .await
                .map(serde_json::to_value)
        } else {
            self.client
                .get_food(params.food_id, &options)
                .await
                .map(serde_json::to_value)
        };

        match result {
            Ok(value) => json_result(&value.map_err(internal)?),
            Err(e) => Ok(error_result("Failed to get food", &e)),
        }
    }

    #[tool(description = "Search foods by name; returns one page of up to 50 results")]
    pub async fn search_foods(
        &self,
        Parameters(params): Parameters<SearchFoodsParams>,
    ) -> Result<CallToolResult, McpError> {
        let localization = self.localization(params.region, params.language);
        let page_number = params.page_number.unwrap_or(0);

        match self
            .client
            .search_foods(&params.query, page_number, &localization)
            .await
        {
            Ok(page) => {
                let has_more = page.has_more();
                let result = json!({
                    "foods": page.results,
                    "page_number": page.page_number,
                    "max_results": page.max_results,
                    "total_results": page.total_results,
                    "has_more": has_more,
                    "search_interpretation": format!(
                        "Found {} foods matching '{}'",
                        page.total_results, params.query
                    )
                });
                json_result(&result)
            }
            Err(e) => Ok(error_result("Failed to search foods", &e)),
        }
    }

    #[tool(description = "Get a recipe with ingredients, directions and nutrition per serving")]
    pub async fn get_recipe(
        &self,
        Parameters(params): Parameters<GetRecipeParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.client.get_recipe(params.recipe_id).await {
            Ok(recipe) => {
                // unknown unless both parts are known
                let total_time = recipe
                    .preparation_time
                    .zip(recipe.cooking_time)
                    .map(|(prep, cook)| prep + cook);
                let mut value = serde_json::to_value(&recipe).map_err(internal)?;
                value["total_time"] = json!(total_time);
                json_result(&value)
            }
            Err(e) => Ok(error_result("Failed to get recipe", &e)),
        }
    }

    #[tool(description = "Search recipes by name; returns one page of up to 50 results")]
    pub async fn search_recipes(
        &self,
        Parameters(params): Parameters<SearchRecipesParams>,
    ) -> Result<CallToolResult, McpError> {
        let page_number = params.page_number.unwrap_or(0);

        match self.client.search_recipes(&params.query, page_number).await {
            Ok(page) => {
                let has_more = page.has_more();
                let result = json!({
                    "recipes": page.results,
                    "page_number": page.page_number,
                    "max_results": page.max_results,
                    "total_results": page.total_results,
                    "has_more": has_more,
                });
                json_result(&result)
            }
            Err(e) => Ok(error_result("Failed to search recipes", &e)),
        }
    }

    #[tool(description = "List the top-level food categories")]
    pub async fn get_food_categories(
        &self,
        Parameters(params): Parameters<GetFoodCategoriesParams>,
    ) -> Result<CallToolResult, McpError> {
        let localization = self.localization(params.region, params.language);

        match self.client.get_food_categories(&localization).await {
            Ok(categories) => json_result(&json!({
                "total_count": categories.len(),
                "food_categories": categories
            })),
            Err(e) => Ok(error_result("Failed to get food categories", &e)),
        }
    }

    #[tool(description = "List the sub-categories of a food category")]
    pub async fn get_food_sub_categories(
        &self,
        Parameters(params): Parameters<GetFoodSubCategoriesParams>,
    ) -> Result<CallToolResult, McpError> {
        let localization = self.localization(params.region, params.language);

        match self
            .client
            .get_food_sub_categories(params.food_category_id, &localization)
            .await
        {
            Ok(sub_categories) => json_result(&json!({
                "food_category_id": params.food_category_id,
                "total_count": sub_categories.len(),
                "food_sub_categories": sub_categories
            })),
            Err(e) => Ok(error_result("Failed to get food sub categories", &e)),
        }
    }
}

fn internal(e: serde_json::Error) -> McpError {
    McpError::internal_error(e.to_string(), None)
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value).map_err(internal)?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

fn error_result(context: &str, err: &FatsecretError) -> CallToolResult {
    tracing::warn!("{}: {}", context, err);
    let error = json!({
        "error": context,
        "details": err.user_message()
    });
    CallToolResult::error(vec![Content::text(error.to_string())])
}

#[tool_handler]
impl ServerHandler for FatsecretMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some("This server provides nutrition data from the FatSecret Platform API. Available tools: food lookup with per-serving nutrients, food search, recipe lookup with ingredients and directions, recipe search, and browsing food categories and sub-categories.".to_string()),
        }
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<InitializeResult, McpError> {
        Ok(self.get_info())
    }
}
