use std::sync::Arc;

use crate::client::{
    auth::{Credential, NonceSource, OAuthSigner},
    normalize,
    request::{FoodGetOptions, Localization, RequestBuilder, RequestDescriptor},
    transport::{HttpTransport, Transport},
    types::*,
};
use crate::config::{FatsecretConfig, DEFAULT_BASE_URL};
use crate::error::Result;

/// FatSecret Platform API client.
///
/// Holds no mutable state: every call signs a fresh parameter set, so one
/// client can be shared across tasks behind an `Arc` without locking.
pub struct FatsecretClient {
    requests: RequestBuilder,
    transport: Arc<dyn Transport>,
}

impl FatsecretClient {
    /// Client for the public endpoint using the default HTTP transport.
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self::with_transport(
            OAuthSigner::new(Credential::new(consumer_key, consumer_secret)),
            DEFAULT_BASE_URL,
            Arc::new(HttpTransport::default()),
        )
    }

    pub fn from_config(config: &FatsecretConfig) -> Self {
        Self::with_transport(
            OAuthSigner::new(config.credential.clone()),
            config.base_url.clone(),
            Arc::new(HttpTransport::new(config.timeout)),
        )
    }

    pub fn with_transport(
        signer: OAuthSigner,
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            requests: RequestBuilder::new(signer, base_url),
            transport,
        }
    }

    /// Replace the nonce/timestamp source, keeping credentials and transport.
    pub fn with_nonce_source(
        credential: Credential,
        nonce_source: Arc<dyn NonceSource>,
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self::with_transport(
            OAuthSigner::with_nonce_source(credential, nonce_source),
            base_url,
            transport,
        )
    }

    async fn send(&self, request: RequestDescriptor) -> Result<Vec<u8>> {
        self.transport.fetch(&request).await
    }

    // Food operations
    pub async fn get_food(&self, food_id: u64, options: &FoodGetOptions) -> Result<Food> {
        let body = self.send(self.requests.food_get(food_id, options)?).await?;
        let food = normalize::food_response(&body)?;
        tracing::debug!("Retrieved food {} with {} servings", food.id, food.servings.len());
        Ok(food)
    }

    pub async fn get_detailed_food(
        &self,
        food_id: u64,
        options: &FoodGetOptions,
    ) -> Result<DetailedFood> {
        let body = self.send(self.requests.food_get(food_id, options)?).await?;
        normalize::detailed_food_response(&body)
    }

    pub async fn search_foods(
        &self,
        query: &str,
        page_number: u32,
        localization: &Localization,
    ) -> Result<PaginatedResponse<CompactFood>> {
        let request = self.requests.foods_search(query, page_number, localization)?;
        let body = self.send(request).await?;
        let page = normalize::foods_search_response(&body, page_number)?;
        tracing::debug!(
            "Food search page {} returned {} of {} results",
            page_number,
            page.results.len(),
            page.total_results
        );
        Ok(page)
    }

    pub async fn get_food_categories(&self, localization: &Localization) -> Result<Vec<FoodCategory>> {
        let body = self.send(self.requests.food_categories_get(localization)?).await?;
        normalize::food_categories_response(&body)
    }

    pub async fn get_food_sub_categories(
        &self,
        food_category_id: u64,
        localization: &Localization,
    ) -> Result<Vec<FoodSubCategory>> {
        let request = self
            .requests
            .food_sub_categories_get(food_category_id, localization)?;
        let body = self.send(request).await?;
        normalize::food_sub_categories_response(&body)
    }

    // Recipe operations
    pub async fn get_recipe(&self, recipe_id: u64) -> Result<Recipe> {
        let body = self.send(self.requests.recipe_get(recipe_id)?).await?;
        normalize::recipe_response(&body)
    }

    pub async fn search_recipes(
        &self,
        query: &str,
        page_number: u32,
    ) -> Result<PaginatedResponse<CompactRecipe>> {
        let body = self.send(self.requests.recipes_search(query, page_number)?).await?;
        let page = normalize::recipes_search_response(&body, page_number)?;
        tracing::debug!(
            "Recipe search page {} returned {} of {} results",
            page_number,
            page.results.len(),
            page.total_results
        );
        Ok(page)
    }
}
