//! Assembles signed request URLs, one builder method per API method.

use crate::client::auth::OAuthSigner;
use crate::client::encoding::ParameterSet;
use crate::error::Result;

/// FatSecret only accepts GET for the REST server endpoint.
pub const HTTP_METHOD: &str = "GET";

/// Page size requested by every search operation.
pub const MAX_RESULTS: u32 = 50;

/// A signed request, ready to hand to a [`Transport`](crate::client::transport::Transport).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestDescriptor {
    method: &'static str,
    api_method: &'static str,
    url: String,
}

impl RequestDescriptor {
    pub fn method(&self) -> &'static str {
        self.method
    }

    /// The FatSecret `method` parameter, e.g. `foods.search`.
    pub fn api_method(&self) -> &'static str {
        self.api_method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

}

/// Optional `region` / `language` codes. Values are escaped like any other
/// parameter, so they cannot inject parameters of their own.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Localization {
    pub region: Option<String>,
    pub language: Option<String>,
}

impl Localization {
    pub fn new(region: Option<String>, language: Option<String>) -> Self {
        Self { region, language }
    }

    fn apply(&self, params: &mut ParameterSet) {
        if let Some(region) = self.region.as_deref() {
            params.insert("region", region);
        }
        if let Some(language) = self.language.as_deref() {
            params.insert("language", language);
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FoodGetOptions {
    pub localization: Localization,
    pub include_sub_categories: bool,
}

/// Builds signed [`RequestDescriptor`]s against a fixed base URL.
#[derive(Clone, Debug)]
pub struct RequestBuilder {
    signer: OAuthSigner,
    base_url: String,
}

impl RequestBuilder {
    pub fn new(signer: OAuthSigner, base_url: impl Into<String>) -> Self {
        Self {
            signer,
            base_url: base_url.into(),
        }
    }

    /// `food.get`: full nutritional detail for one food.
    pub fn food_get(&self, food_id: u64, options: &FoodGetOptions) -> Result<RequestDescriptor> {
        let mut params = ParameterSet::new();
        params.insert("food_id", food_id.to_string());
        options.localization.apply(&mut params);
        if options.include_sub_categories {
            params.insert("include_sub_categories", "true");
        }
        self.build("food.get", params)
    }

    /// `foods.search`: one page of compact foods matching `query`.
    pub fn foods_search(
        &self,
        query: &str,
        page_number: u32,
        localization: &Localization,
    ) -> Result<RequestDescriptor> {
        let mut params = search_params(query, page_number);
        localization.apply(&mut params);
        self.build("foods.search", params)
    }

    /// `recipe.get`
    pub fn recipe_get(&self, recipe_id: u64) -> Result<RequestDescriptor> {
        let mut params = ParameterSet::new();
        params.insert("recipe_id", recipe_id.to_string());
        self.build("recipe.get", params)
    }

    /// `recipes.search`
    pub fn recipes_search(&self, query: &str, page_number: u32) -> Result<RequestDescriptor> {
        self.build("recipes.search", search_params(query, page_number))
    }

    /// `food_categories.get`
    pub fn food_categories_get(&self, localization: &Localization) -> Result<RequestDescriptor> {
        let mut params = ParameterSet::new();
        localization.apply(&mut params);
        self.build("food_categories.get", params)
    }

    /// `food_sub_categories.get`
    pub fn food_sub_categories_get(
        &self,
        food_category_id: u64,
        localization: &Localization,
    ) -> Result<RequestDescriptor> {
        let mut params = ParameterSet::new();
        params.insert("food_category_id", food_category_id.to_string());
        localization.apply(&mut params);
        self.build("food_sub_categories.get", params)
    }

    /// Merge `extra` into fresh OAuth parameters, sign, and render the URL.
    ///
    /// The signature covers exactly the parameters that end up in the query
    /// string; only `oauth_signature` is added afterwards.
    fn build(&self, api_method: &'static str, extra: ParameterSet) -> Result<RequestDescriptor> {
        let mut params = self.signer.oauth_params();
        params.insert("method", api_method).merge(extra);

        let signature = self.signer.sign(HTTP_METHOD, &self.base_url, &params)?;

        let mut signed = params;
        signed.insert_encoded("oauth_signature", signature);
        let url = format!("{}?{}", self.base_url, signed.canonicalize());

        tracing::debug!(
            "Assembled {} request with {} parameters",
            api_method,
            signed.len()
        );

        Ok(RequestDescriptor {
            method: HTTP_METHOD,
            api_method,
            url,
        })
    }
}

fn search_params(query: &str, page_number: u32) -> ParameterSet {
    let mut params = ParameterSet::new();
    params
        .insert("search_expression", query)
        .insert("page_number", page_number.to_string())
        .insert("max_results", MAX_RESULTS.to_string());
    params
}
