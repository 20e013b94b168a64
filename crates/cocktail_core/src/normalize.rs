//! crates/cocktail_core/src/normalize.rs
//!
//! Turns a raw catalog record into a `NormalizedDrink`.
//!
//! The catalog stores ingredients as two runs of numbered fields,
//! `strIngredient1..N` followed later by `strMeasure1..N`. All knowledge of that
//! layout lives in [`pair_ingredients`].

use crate::domain::{Alcoholic, Ingredient, NormalizedDrink, RawCatalogRecord};

/// Field names used by the catalog service.
pub mod fields {
    pub const ID: &str = "idDrink";
    pub const NAME: &str = "strDrink";
    pub const TAGS: &str = "strTags";
    pub const CATEGORY: &str = "strCategory";
    pub const ALCOHOLIC: &str = "strAlcoholic";
    pub const GLASS: &str = "strGlass";
    pub const INSTRUCTIONS: &str = "strInstructions";
    pub const THUMBNAIL: &str = "strDrinkThumb";
    pub const INGREDIENT_PREFIX: &str = "strIngredient";
    pub const MEASURE_PREFIX: &str = "strMeasure";
}

pub const DEFAULT_INGREDIENT_IMAGE_BASE: &str = "https://www.thecocktaildb.com/images/ingredients";

/// Builds the image URL of an ingredient. The name is inserted verbatim;
/// encoding is left to whatever eventually issues the request.
pub fn ingredient_image_url(base: &str, ingredient: &str) -> String {
    format!("{}/{}.png", base.trim_end_matches('/'), ingredient)
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Pairs each ingredient with its measure, in ingredient order.
///
/// Walks from `strIngredient1` towards `strMeasure1`; the measure for the
/// ingredient at position `i` is expected at `i + gap`, where `gap` is the
/// distance between the two runs. A measure whose numeric suffix does not
/// match is looked up by name instead, so a missing measure never shifts the
/// rest. The walk ends at the first absent or blank ingredient.
pub fn pair_ingredients(record: &RawCatalogRecord) -> Vec<(String, Option<String>)> {
    let entries = record.fields();
    let first_ingredient = format!("{}1", fields::INGREDIENT_PREFIX);
    let first_measure = format!("{}1", fields::MEASURE_PREFIX);

    let Some(start) = record.position(&first_ingredient) else {
        return Vec::new();
    };
    let measure_start = record.position(&first_measure).filter(|m| *m > start);
    let end = measure_start.unwrap_or(entries.len());
    let gap = measure_start.map(|m| m - start);

    let mut pairs = Vec::new();
    for i in start..end {
        let (key, value) = &entries[i];
        let Some(suffix) = key.strip_prefix(fields::INGREDIENT_PREFIX) else {
            break;
        };
        let Some(name) = present(value.as_deref()) else {
            break;
        };

        let measure_key = format!("{}{}", fields::MEASURE_PREFIX, suffix);
        let positional = gap
            .and_then(|gap| entries.get(i + gap))
            .filter(|(candidate, _)| *candidate == measure_key)
            .and_then(|(_, measure)| present(measure.as_deref()));
        let measure = positional.or_else(|| present(record.get(&measure_key)));

        pairs.push((name.to_string(), measure.map(str::to_string)));
    }

    pairs
}

fn split_tags(raw: Option<&str>) -> Vec<String> {
    raw.map(|tags| {
        tags.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Builds the view model. Returns `None` if the record lacks an id or a name.
pub fn normalize_record(record: &RawCatalogRecord, image_base: &str) -> Option<NormalizedDrink> {
    let owned = |field: &str| present(record.get(field)).map(str::to_string);

    let ingredients = pair_ingredients(record)
        .into_iter()
        .map(|(name, measure)| Ingredient {
            image_url: ingredient_image_url(image_base, &name),
            name,
            measure,
        })
        .collect();

    Some(NormalizedDrink {
        id: owned(fields::ID)?,
        name: owned(fields::NAME)?,
        tags: split_tags(record.get(fields::TAGS)),
        category: owned(fields::CATEGORY),
        alcoholic: present(record.get(fields::ALCOHOLIC)).map(Alcoholic::parse),
        glass: owned(fields::GLASS),
        instructions: owned(fields::INSTRUCTIONS),
        image_url: owned(fields::THUMBNAIL),
        ingredients,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn margarita() -> RawCatalogRecord {
        RawCatalogRecord::from_iter([
            ("idDrink", Some("11007")),
            ("strDrink", Some("Margarita")),
            ("strTags", Some("IBA,ContemporaryClassic")),
            ("strCategory", Some("Ordinary Drink")),
            ("strAlcoholic", Some("Alcoholic")),
            ("strGlass", Some("Cocktail glass")),
            ("strInstructions", Some("Rub the rim of the glass with the lime slice.")),
            ("strDrinkThumb", Some("https://example.test/margarita.jpg")),
            ("strIngredient1", Some("Tequila")),
            ("strIngredient2", Some("Triple sec")),
            ("strIngredient3", Some("Lime juice")),
            ("strIngredient4", Some("  ")),
            ("strIngredient5", None),
            ("strMeasure1", Some("1 1/2 oz ")),
            ("strMeasure2", Some("1/2 oz ")),
            ("strMeasure3", Some("1 oz ")),
            ("strMeasure4", None),
            ("strMeasure5", None),
            ("strImageSource", None),
        ])
    }

    #[test]
    fn pairs_three_ingredients_and_stops_at_blank() {
        let drink = normalize_record(&margarita(), DEFAULT_INGREDIENT_IMAGE_BASE).unwrap();

        assert_eq!(drink.ingredients.len(), 3);
        assert_eq!(drink.ingredients[0].name, "Tequila");
        assert_eq!(drink.ingredients[0].measure.as_deref(), Some("1 1/2 oz "));
        assert_eq!(drink.ingredients[2].name, "Lime juice");
        assert_eq!(drink.ingredients[2].measure.as_deref(), Some("1 oz "));
    }

    #[test]
    fn image_url_embeds_exact_name() {
        let drink = normalize_record(&margarita(), DEFAULT_INGREDIENT_IMAGE_BASE).unwrap();

        assert_eq!(
            drink.ingredients[1].image_url,
            "https://www.thecocktaildb.com/images/ingredients/Triple sec.png"
        );
        assert!(!drink.ingredients[1].image_url.contains("%20"));
    }

    #[test]
    fn maps_fixed_fields() {
        let drink = normalize_record(&margarita(), "https://img.test/").unwrap();

        assert_eq!(drink.id, "11007");
        assert_eq!(drink.name, "Margarita");
        assert_eq!(drink.tags, vec!["IBA", "ContemporaryClassic"]);
        assert_eq!(drink.category.as_deref(), Some("Ordinary Drink"));
        assert_eq!(drink.alcoholic, Some(Alcoholic::Alcoholic));
        assert_eq!(drink.glass.as_deref(), Some("Cocktail glass"));
        assert_eq!(drink.image_url.as_deref(), Some("https://example.test/margarita.jpg"));
        assert_eq!(drink.ingredients[0].image_url, "https://img.test/Tequila.png");
    }

    #[test]
    fn stripped_record_with_missing_last_measure() {
        let record = RawCatalogRecord::from_iter([
            ("idDrink", Some("1")),
            ("strDrink", Some("Gin Fizz")),
            ("strIngredient1", Some("Gin")),
            ("strIngredient2", Some("Lemon")),
            ("strIngredient3", Some("Soda water")),
            ("strMeasure1", Some("2 oz")),
            ("strMeasure2", Some("1 juice")),
            ("strCreativeCommonsConfirmed", Some("No")),
        ]);

        let pairs = pair_ingredients(&record);
        assert_eq!(
            pairs,
            vec![
                ("Gin".to_string(), Some("2 oz".to_string())),
                ("Lemon".to_string(), Some("1 juice".to_string())),
                ("Soda water".to_string(), None),
            ]
        );
    }

    #[test]
    fn gap_in_measures_does_not_shift_later_ones() {
        let record = RawCatalogRecord::from_iter([
            ("strIngredient1", Some("Rum")),
            ("strIngredient2", Some("Mint")),
            ("strIngredient3", Some("Lime")),
            ("strMeasure1", Some("2 oz")),
            ("strMeasure3", Some("1/2")),
        ]);

        let measures: Vec<_> = pair_ingredients(&record).into_iter().map(|(_, m)| m).collect();
        assert_eq!(measures, vec![Some("2 oz".to_string()), None, Some("1/2".to_string())]);
    }

    #[test]
    fn record_without_ingredients() {
        let record = RawCatalogRecord::from_iter([("idDrink", Some("9")), ("strDrink", Some("Water"))]);
        let drink = normalize_record(&record, DEFAULT_INGREDIENT_IMAGE_BASE).unwrap();
        assert!(drink.ingredients.is_empty());
        assert!(drink.tags.is_empty());
        assert_eq!(drink.alcoholic, None);
    }

    #[test]
    fn record_without_id_is_rejected() {
        let record = RawCatalogRecord::from_iter([("strDrink", Some("Nameless"))]);
        assert!(normalize_record(&record, DEFAULT_INGREDIENT_IMAGE_BASE).is_none());
    }

    #[test]
    fn alcoholic_variants() {
        assert_eq!(Alcoholic::parse("Non alcoholic"), Alcoholic::NonAlcoholic);
        assert_eq!(Alcoholic::parse("Optional alcohol"), Alcoholic::Optional);
        assert_eq!(Alcoholic::parse("Maybe"), Alcoholic::Unknown("Maybe".to_string()));
    }
}
