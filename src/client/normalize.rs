//! Converts FatSecret JSON payloads into the typed domain model.
//!
//! The API is loose about shapes. A collection such as `servings.serving`
//! arrives as an array when there are several entries, as a bare object (or
//! bare string) when there is exactly one, and is left out entirely when
//! there are none. Numbers are sent as strings. This module absorbs all of
//! that in one place:
//!
//! - [`one_or_many`] turns absent / single / array into a slice-like `Vec`.
//! - [`collection`] applies an element parser over that, dropping (and
//!   logging) elements that fail their identity checks.
//! - optional scalar fields that fail to parse become `None`; mandatory id and
//!   name fields that fail abort the record with
//!   [`FatsecretError::IdentityFieldMissing`].

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::client::types::*;
use crate::error::{FatsecretError, Result};

/// Parse a response body, surfacing the service's error envelope if present.
pub fn parse_payload(body: &[u8]) -> Result<Value> {
    let payload: Value = serde_json::from_slice(body)
        .map_err(|e| FatsecretError::malformed(format!("Response is not valid JSON: {e}")))?;

    if let Some(error) = payload.get("error") {
        let code = error
            .get("code")
            .and_then(|c| c.as_i64().or_else(|| c.as_str().and_then(|s| s.parse().ok())))
            .unwrap_or_default();
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error")
            .to_string();
        tracing::error!("FatSecret API returned error {}: {}", code, message);
        return Err(FatsecretError::Api { code, message });
    }

    Ok(payload)
}

/// The value under a top-level key every successful response must carry.
pub fn top_level<'a>(payload: &'a Value, key: &str) -> Result<&'a Value> {
    match payload.get(key) {
        Some(Value::Null) | None => Err(FatsecretError::malformed(format!(
            "Expected top-level `{key}` object"
        ))),
        Some(value) => Ok(value),
    }
}

/// View a possibly-absent, possibly-single value as a sequence.
pub fn one_or_many(value: Option<&Value>) -> Vec<&Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(single) => vec![single],
    }
}

/// Parse `container.field` as a collection, whatever shape it arrived in.
///
/// Elements whose parser fails are skipped with a warning; the rest of the
/// collection is still returned in order.
pub fn collection<T, F>(container: Option<&Value>, field: &str, mut parse: F) -> Vec<T>
where
    F: FnMut(&Value) -> Result<T>,
{
    let value = container.and_then(|c| c.get(field));
    one_or_many(value)
        .into_iter()
        .filter_map(|item| match parse(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("Skipping `{}` entry: {}", field, e);
                None
            }
        })
        .collect()
}

// Scalar fields

fn string_field(object: &Value, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parsed_field<T: FromStr>(object: &Value, key: &str) -> Option<T> {
    let raw = string_field(object, key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::debug!("Ignoring unparsable `{}` value {:?}", key, raw);
            None
        }
    }
}

fn decimal_field(object: &Value, key: &str) -> Option<Decimal> {
    let raw = string_field(object, key)?;
    let raw = raw.trim();
    match Decimal::from_str(raw).or_else(|_| Decimal::from_scientific(raw)) {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::debug!("Ignoring unparsable `{}` value {:?}", key, raw);
            None
        }
    }
}

fn required_string(object: &Value, record: &'static str, key: &'static str) -> Result<String> {
    string_field(object, key)
        .filter(|s| !s.is_empty())
        .ok_or(FatsecretError::IdentityFieldMissing { record, field: key })
}

fn required_id(object: &Value, record: &'static str, key: &'static str) -> Result<u64> {
    parsed_field(object, key).ok_or(FatsecretError::IdentityFieldMissing { record, field: key })
}

fn required_count(wrapper: &Value, key: &str) -> Result<u32> {
    parsed_field(wrapper, key)
        .ok_or_else(|| FatsecretError::malformed(format!("Missing or invalid `{key}`")))
}

fn text(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(FatsecretError::malformed(format!(
            "Expected a string, found {other}"
        ))),
    }
}

fn food_type(object: &Value) -> Result<FoodType> {
    required_string(object, "food", "food_type").map(|t| FoodType::parse(&t))
}

/// `brand_name` is only meaningful for branded foods.
fn brand_name(object: &Value, food_type: &FoodType) -> Option<String> {
    if food_type.is_brand() {
        string_field(object, "brand_name")
    } else {
        None
    }
}

// Records

pub fn compact_food(object: &Value) -> Result<CompactFood> {
    let food_type = food_type(object)?;
    Ok(CompactFood {
        id: required_id(object, "food", "food_id")?,
        name: required_string(object, "food", "food_name")?,
        url: string_field(object, "food_url"),
        description: string_field(object, "food_description"),
        brand_name: brand_name(object, &food_type),
        food_type,
    })
}

pub fn food(object: &Value) -> Result<Food> {
    let food_type = food_type(object)?;
    Ok(Food {
        id: required_id(object, "food", "food_id")?,
        name: required_string(object, "food", "food_name")?,
        url: string_field(object, "food_url"),
        brand_name: brand_name(object, &food_type),
        food_type,
        servings: collection(object.get("servings"), "serving", serving),
        food_sub_categories: collection(
            object.get("food_sub_categories"),
            "food_sub_category",
            food_sub_category,
        ),
    })
}

pub fn detailed_food(object: &Value) -> Result<DetailedFood> {
    let food = food(object)?;
    let categories = collection(object.get("food_categories"), "food_category", food_category);
    Ok(DetailedFood::new(food, categories))
}

pub fn serving(object: &Value) -> Result<Serving> {
    if !object.is_object() {
        return Err(FatsecretError::malformed("Serving is not an object"));
    }
    Ok(Serving {
        serving_id: parsed_field(object, "serving_id"),
        serving_description: string_field(object, "serving_description"),
        serving_url: string_field(object, "serving_url"),
        metric_serving_amount: decimal_field(object, "metric_serving_amount"),
        metric_serving_unit: string_field(object, "metric_serving_unit"),
        number_of_units: decimal_field(object, "number_of_units"),
        measurement_description: string_field(object, "measurement_description"),
        calories: decimal_field(object, "calories"),
        carbohydrate: decimal_field(object, "carbohydrate"),
        protein: decimal_field(object, "protein"),
        fat: decimal_field(object, "fat"),
        saturated_fat: decimal_field(object, "saturated_fat"),
        polyunsaturated_fat: decimal_field(object, "polyunsaturated_fat"),
        monounsaturated_fat: decimal_field(object, "monounsaturated_fat"),
        trans_fat: decimal_field(object, "trans_fat"),
        cholesterol: decimal_field(object, "cholesterol"),
        sodium: decimal_field(object, "sodium"),
        potassium: decimal_field(object, "potassium"),
        fiber: decimal_field(object, "fiber"),
        sugar: decimal_field(object, "sugar"),
        vitamin_a: decimal_field(object, "vitamin_a"),
        vitamin_c: decimal_field(object, "vitamin_c"),
        calcium: decimal_field(object, "calcium"),
        iron: decimal_field(object, "iron"),
    })
}

pub fn food_category(object: &Value) -> Result<FoodCategory> {
    Ok(FoodCategory {
        id: required_id(object, "food category", "food_category_id")?,
        name: required_string(object, "food category", "food_category_name")?,
        description: string_field(object, "food_category_description"),
    })
}

/// Sub-categories are bare strings on the wire.
pub fn food_sub_category(value: &Value) -> Result<FoodSubCategory> {
    match value {
        Value::String(name) if !name.is_empty() => Ok(FoodSubCategory { name: name.clone() }),
        _ => Err(FatsecretError::IdentityFieldMissing {
            record: "food sub category",
            field: "food_sub_category",
        }),
    }
}

pub fn compact_recipe(object: &Value) -> Result<CompactRecipe> {
    Ok(CompactRecipe {
        id: required_id(object, "recipe", "recipe_id")?,
        name: required_string(object, "recipe", "recipe_name")?,
        url: string_field(object, "recipe_url"),
        description: string_field(object, "recipe_description"),
        images: collection(Some(object), "recipe_image", text),
    })
}

pub fn recipe(object: &Value) -> Result<Recipe> {
    Ok(Recipe {
        id: required_id(object, "recipe", "recipe_id")?,
        name: required_string(object, "recipe", "recipe_name")?,
        url: string_field(object, "recipe_url"),
        description: string_field(object, "recipe_description"),
        images: collection(object.get("recipe_images"), "recipe_image", text),
        rating: parsed_field(object, "rating"),
        types: collection(object.get("recipe_types"), "recipe_type", text),
        number_of_servings: decimal_field(object, "number_of_servings"),
        preparation_time: parsed_field(object, "preparation_time_min"),
        cooking_time: parsed_field(object, "cooking_time_min"),
        categories: collection(object.get("recipe_categories"), "recipe_category", category),
        serving: collection(object.get("serving_sizes"), "serving", serving)
            .into_iter()
            .next(),
        directions: collection(object.get("directions"), "direction", direction),
        ingredients: collection(object.get("ingredients"), "ingredient", ingredient),
    })
}

pub fn category(object: &Value) -> Result<Category> {
    Ok(Category {
        name: required_string(object, "recipe category", "recipe_category_name")?,
        url: string_field(object, "recipe_category_url"),
    })
}

pub fn direction(object: &Value) -> Result<Direction> {
    Ok(Direction {
        number: parsed_field(object, "direction_number"),
        description: required_string(object, "direction", "direction_description")?,
    })
}

pub fn ingredient(object: &Value) -> Result<Ingredient> {
    Ok(Ingredient {
        food_id: required_id(object, "ingredient", "food_id")?,
        name: required_string(object, "ingredient", "food_name")?,
        serving_id: parsed_field(object, "serving_id"),
        description: string_field(object, "ingredient_description"),
        url: string_field(object, "ingredient_url"),
        number_of_units: decimal_field(object, "number_of_units"),
        measurement_description: string_field(object, "measurement_description"),
    })
}

/// Extract one page of results from a search wrapper such as `foods`.
///
/// Items are only read when the page can hold any: either the service
/// reported exactly one hit (which it sends as a bare object rather than an
/// array, on any page), or `total_results` exceeds the results on all pages
/// before this one. Otherwise the page is empty.
pub fn page<T, F>(wrapper: &Value, item_key: &str, page_number: u32, parse: F) -> Result<PaginatedResponse<T>>
where
    F: FnMut(&Value) -> Result<T>,
{
    let max_results = required_count(wrapper, "max_results")?;
    let total_results = required_count(wrapper, "total_results")?;

    let offset = u64::from(max_results) * u64::from(page_number);
    let mut results = if total_results == 1 || u64::from(total_results) > offset {
        collection(Some(wrapper), item_key, parse)
    } else {
        Vec::new()
    };

    if results.len() > max_results as usize {
        tracing::warn!(
            "Page holds {} `{}` entries but max_results is {}; truncating",
            results.len(),
            item_key,
            max_results
        );
        results.truncate(max_results as usize);
    }

    Ok(PaginatedResponse {
        page_number,
        max_results,
        total_results,
        results,
    })
}

// Whole responses

/// Parse a `food.get` response.
pub fn food_response(body: &[u8]) -> Result<Food> {
    let payload = parse_payload(body)?;
    food(top_level(&payload, "food")?)
}

/// Parse a `food.get` response, keeping the food categories as well.
pub fn detailed_food_response(body: &[u8]) -> Result<DetailedFood> {
    let payload = parse_payload(body)?;
    detailed_food(top_level(&payload, "food")?)
}

/// Parse a `foods.search` response.
pub fn foods_search_response(body: &[u8], page_number: u32) -> Result<PaginatedResponse<CompactFood>> {
    let payload = parse_payload(body)?;
    page(top_level(&payload, "foods")?, "food", page_number, compact_food)
}

/// Parse a `recipe.get` response.
pub fn recipe_response(body: &[u8]) -> Result<Recipe> {
    let payload = parse_payload(body)?;
    recipe(top_level(&payload, "recipe")?)
}

/// Parse a `recipes.search` response.
pub fn recipes_search_response(
    body: &[u8],
    page_number: u32,
) -> Result<PaginatedResponse<CompactRecipe>> {
    let payload = parse_payload(body)?;
    page(top_level(&payload, "recipes")?, "recipe", page_number, compact_recipe)
}

/// Parse a `food_categories.get` response.
pub fn food_categories_response(body: &[u8]) -> Result<Vec<FoodCategory>> {
    let payload = parse_payload(body)?;
    let wrapper = top_level(&payload, "food_categories")?;
    Ok(collection(Some(wrapper), "food_category", food_category))
}

/// Parse a `food_sub_categories.get` response.
pub fn food_sub_categories_response(body: &[u8]) -> Result<Vec<FoodSubCategory>> {
    let payload = parse_payload(body)?;
    let wrapper = top_level(&payload, "food_sub_categories")?;
    Ok(collection(Some(wrapper), "food_sub_category", food_sub_category))
}
