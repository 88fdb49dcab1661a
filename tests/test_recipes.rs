mod common;

use std::str::FromStr;

use common::fixture_client;
use mcp_fatsecret::FatsecretError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

const RECIPE_FULL: &str = include_str!("fixtures/recipe_full.json");
const RECIPE_SINGLE_SHAPES: &str = include_str!("fixtures/recipe_single_shapes.json");
const RECIPES_SEARCH: &str = include_str!("fixtures/recipes_search.json");

#[tokio::test]
async fn test_get_recipe() {
    common::init_test_logging();
    let (client, transport) = fixture_client(RECIPE_FULL);

    let recipe = client.get_recipe(91).await.expect("recipe.get should succeed");

    assert_eq!(recipe.id, 91);
    assert_eq!(recipe.name, "Baked Lemon Snapper");
    assert_eq!(recipe.images.len(), 2);
    assert_eq!(recipe.rating, Some(4));
    assert_eq!(recipe.types, vec!["Main Dish", "Seafood"]);
    assert_eq!(recipe.number_of_servings, Some(Decimal::from(4)));
    assert_eq!(recipe.preparation_time, Some(10));
    assert_eq!(recipe.cooking_time, Some(20));

    assert_eq!(recipe.categories.len(), 2);
    assert_eq!(recipe.categories[1].name, "High Protein");

    let serving = recipe.serving.as_ref().expect("recipe should have a serving");
    assert_eq!(serving.calories, Some(Decimal::from(177)));
    assert_eq!(serving.protein, Some(Decimal::from_str("30.19").unwrap()));

    let steps: Vec<Option<u32>> = recipe.directions.iter().map(|d| d.number).collect();
    assert_eq!(steps, vec![Some(1), Some(2), Some(3)]);

    assert_eq!(recipe.ingredients.len(), 2);
    let snapper = &recipe.ingredients[1];
    assert_eq!(snapper.food_id, 39338);
    assert_eq!(snapper.serving_id, Some(42311));
    assert_eq!(snapper.number_of_units, Some(Decimal::from(4)));
    assert_eq!(snapper.url, None);

    let url = transport.last_url();
    assert_eq!(common::query_param(&url, "method").as_deref(), Some("recipe.get"));
    assert_eq!(common::query_param(&url, "recipe_id").as_deref(), Some("91"));
}

#[tokio::test]
async fn test_get_recipe_single_object_shapes() {
    let (client, _) = fixture_client(RECIPE_SINGLE_SHAPES);

    let recipe = client.get_recipe(4422).await.unwrap();

    assert_eq!(recipe.images, vec!["https://m.ftscrt.com/static/recipe/oats.jpg"]);
    assert_eq!(recipe.types, vec!["Breakfast"]);
    assert_eq!(recipe.categories.len(), 1);
    assert_eq!(recipe.categories[0].name, "Vegetarian");
    assert_eq!(recipe.directions.len(), 1);
    assert_eq!(recipe.directions[0].number, Some(1));
}

#[tokio::test]
async fn test_get_recipe_missing_optional_fields() {
    let (client, _) = fixture_client(RECIPE_SINGLE_SHAPES);

    let recipe = client.get_recipe(4422).await.unwrap();

    // cooking_time_min is absent and "not rated" is not a number
    assert_eq!(recipe.cooking_time, None);
    assert_eq!(recipe.rating, None);
    assert_eq!(recipe.preparation_time, Some(5));
    // no serving_sizes or ingredients containers at all
    assert_eq!(recipe.serving, None);
    assert!(recipe.ingredients.is_empty());
}

#[tokio::test]
async fn test_get_recipe_drops_incomplete_entries() {
    let body = r#"{
        "recipe": {
            "recipe_id": "5",
            "recipe_name": "Toast",
            "ingredients": {
                "ingredient": [
                    {"food_id": "1", "food_name": "Bread"},
                    {"food_name": "Butter without id"},
                    {"food_id": "3", "food_name": "Jam"}
                ]
            },
            "directions": {
                "direction": [
                    {"direction_number": "1"},
                    {"direction_number": "2", "direction_description": "Toast the bread."}
                ]
            }
        }
    }"#;
    let (client, _) = fixture_client(body);

    let recipe = client.get_recipe(5).await.unwrap();

    let names: Vec<&str> = recipe.ingredients.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Bread", "Jam"]);
    assert_eq!(recipe.directions.len(), 1);
    assert_eq!(recipe.directions[0].description, "Toast the bread.");
}

#[tokio::test]
async fn test_get_recipe_missing_name_is_fatal() {
    let (client, _) = fixture_client(r#"{"recipe": {"recipe_id": "5"}}"#);

    let err = client.get_recipe(5).await.unwrap_err();
    assert!(matches!(
        err,
        FatsecretError::IdentityFieldMissing {
            record: "recipe",
            field: "recipe_name"
        }
    ));
}

#[tokio::test]
async fn test_get_recipe_invalid_json() {
    let (client, _) = fixture_client("<html>Service Unavailable</html>");

    let err = client.get_recipe(5).await.unwrap_err();
    assert!(matches!(err, FatsecretError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_search_recipes() {
    let (client, transport) = fixture_client(RECIPES_SEARCH);

    let page = client.search_recipes("lemon", 0).await.unwrap();

    assert_eq!(page.total_results, 2);
    assert_eq!(page.max_results, 50);
    assert_eq!(page.results.len(), 2);

    let first = &page.results[0];
    assert_eq!(first.id, 91);
    assert_eq!(first.images, vec!["https://m.ftscrt.com/static/recipe/a1.jpg"]);

    let second = &page.results[1];
    assert_eq!(second.url, None);
    assert!(second.images.is_empty());

    assert_eq!(
        common::query_param(&transport.last_url(), "method").as_deref(),
        Some("recipes.search")
    );
}

#[tokio::test]
async fn test_search_recipes_single_result_object() {
    let body = r#"{
        "recipes": {
            "max_results": "50",
            "total_results": "1",
            "page_number": "0",
            "recipe": {"recipe_id": "91", "recipe_name": "Baked Lemon Snapper"}
        }
    }"#;
    let (client, _) = fixture_client(body);

    let page = client.search_recipes("snapper", 0).await.unwrap();
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].name, "Baked Lemon Snapper");
}
