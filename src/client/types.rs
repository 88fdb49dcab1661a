//! Domain model for FatSecret foods and recipes.
//!
//! These are plain value records produced by the
//! [`normalize`](crate::client::normalize) module; none of them keep a
//! reference to the payload they were parsed from.
//!
//! ## Absent vs. zero
//!
//! Numeric fields use [`Decimal`] so nutrient values are kept exactly as the
//! API reports them. A field the API omitted, or sent in a form that could not
//! be parsed, is `None`. It is never defaulted to zero.
//!
//! ## Key Types
//!
//! - [`CompactFood`] / [`Food`] / [`DetailedFood`] - search hits, full foods, foods with categories
//! - [`Serving`] - one portion size with its nutrient breakdown
//! - [`CompactRecipe`] / [`Recipe`] - search hits and full recipes
//! - [`PaginatedResponse`] - one page of search results

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

/// The `food_type` of a food.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum FoodType {
    Generic,
    Brand,
    Other(String),
}

impl FoodType {
    pub fn parse(value: &str) -> Self {
        match value {
            "Generic" => FoodType::Generic,
            "Brand" => FoodType::Brand,
            other => FoodType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FoodType::Generic => "Generic",
            FoodType::Brand => "Brand",
            FoodType::Other(other) => other,
        }
    }

    pub fn is_brand(&self) -> bool {
        matches!(self, FoodType::Brand)
    }
}

impl fmt::Display for FoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<FoodType> for String {
    fn from(value: FoodType) -> Self {
        value.as_str().to_string()
    }
}

/// Summary information about a food, as returned by `foods.search`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompactFood {
    pub id: u64,
    pub name: String,
    pub food_type: FoodType,
    pub url: Option<String>,
    /// Short nutrition summary, e.g. "Per 100g - Calories: 157kcal | ..."
    pub description: Option<String>,
    /// Only ever set for [`FoodType::Brand`] foods.
    pub brand_name: Option<String>,
}

/// Full detail for a single food, as returned by `food.get`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Food {
    pub id: u64,
    pub name: String,
    pub food_type: FoodType,
    pub url: Option<String>,
    pub brand_name: Option<String>,
    pub servings: Vec<Serving>,
    pub food_sub_categories: Vec<FoodSubCategory>,
}

/// A [`Food`] together with the food categories it belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DetailedFood {
    #[serde(flatten)]
    pub food: Food,
    pub food_categories: Vec<FoodCategory>,
}

impl DetailedFood {
    pub fn new(food: Food, food_categories: Vec<FoodCategory>) -> Self {
        Self {
            food,
            food_categories,
        }
    }
}

/// Nutrient values for one portion size of a food or recipe.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Serving {
    pub serving_id: Option<u64>,
    pub serving_description: Option<String>,
    pub serving_url: Option<String>,
    pub metric_serving_amount: Option<Decimal>,
    pub metric_serving_unit: Option<String>,
    pub number_of_units: Option<Decimal>,
    pub measurement_description: Option<String>,
    pub calories: Option<Decimal>,
    pub carbohydrate: Option<Decimal>,
    pub protein: Option<Decimal>,
    pub fat: Option<Decimal>,
    pub saturated_fat: Option<Decimal>,
    pub polyunsaturated_fat: Option<Decimal>,
    pub monounsaturated_fat: Option<Decimal>,
    pub trans_fat: Option<Decimal>,
    pub cholesterol: Option<Decimal>,
    pub sodium: Option<Decimal>,
    pub potassium: Option<Decimal>,
    pub fiber: Option<Decimal>,
    pub sugar: Option<Decimal>,
    pub vitamin_a: Option<Decimal>,
    pub vitamin_c: Option<Decimal>,
    pub calcium: Option<Decimal>,
    pub iron: Option<Decimal>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FoodCategory {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FoodSubCategory {
    pub name: String,
}

/// Summary information about a recipe, as returned by `recipes.search`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompactRecipe {
    pub id: u64,
    pub name: String,
    pub url: Option<String>,
    pub description: Option<String>,
    pub images: Vec<String>,
}

/// A complete recipe with ingredients, directions and per-serving nutrition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Recipe {
    pub id: u64,
    pub name: String,
    pub url: Option<String>,
    pub description: Option<String>,
    pub images: Vec<String>,
    /// User rating, 1 to 5
    pub rating: Option<u32>,
    pub types: Vec<String>,
    pub number_of_servings: Option<Decimal>,
    /// Preparation time in minutes
    pub preparation_time: Option<u32>,
    /// Cooking time in minutes
    pub cooking_time: Option<u32>,
    pub categories: Vec<Category>,
    /// Nutrition for a single serving of the recipe
    pub serving: Option<Serving>,
    pub directions: Vec<Direction>,
    pub ingredients: Vec<Ingredient>,
}

/// A category a recipe is classified under.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    pub url: Option<String>,
}

/// One step of a recipe's method.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Direction {
    pub number: Option<u32>,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Ingredient {
    pub food_id: u64,
    pub name: String,
    pub serving_id: Option<u64>,
    /// Full text, e.g. "1 cup chopped onions"
    pub description: Option<String>,
    pub url: Option<String>,
    pub number_of_units: Option<Decimal>,
    pub measurement_description: Option<String>,
}

/// One page of search results.
///
/// `results.len()` never exceeds `max_results`; `total_results` is the
/// remote count across all pages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PaginatedResponse<T> {
    /// Zero-based page index
    pub page_number: u32,
    pub max_results: u32,
    pub total_results: u32,
    pub results: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    /// True when pages after this one may hold more results.
    pub fn has_more(&self) -> bool {
        let seen = u64::from(self.max_results) * (u64::from(self.page_number) + 1);
        u64::from(self.total_results) > seen
    }
}
