use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::external::Resource;
use crate::validation::{self, FieldErrors, Validate};

static BOT_NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9 ]+$").unwrap());

/// A trading strategy sold on the platform. `validity` is a `YYYY-MM-DD` string.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlgoBot {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub validity: String,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlgoBotForm {
    #[schema(example = "Momentum Scalper")]
    pub name: String,
    pub description: String,
    #[schema(example = 4999.0)]
    pub price: f64,
    #[schema(example = "2026-12-31")]
    pub validity: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Validate for AlgoBotForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(
            "name",
            validation::length(&self.name, "Name", 3, 50).and_then(|_| {
                validation::pattern(
                    &self.name,
                    &BOT_NAME_RE,
                    "Name may only contain letters, numbers and spaces",
                )
            }),
        );
        errors.check(
            "description",
            validation::length(&self.description, "Description", 10, 500),
        );
        errors.check(
            "price",
            validation::at_least(self.price, "Price", 0.0).and_then(|_| {
                if self.price.is_finite() {
                    Ok(())
                } else {
                    Err("Price must be a number".to_string())
                }
            }),
        );
        errors.check(
            "validity",
            validation::date(&self.validity, "Validity").map(|_| ()),
        );
        errors.into_result()
    }
}

pub struct AlgoBots;

impl Resource for AlgoBots {
    const PATH: &'static str = "strategies";
    const SLUG: &'static str = "algobots";
    const LABEL: &'static str = "Algobot";
    const TOGGLEABLE: bool = true;

    type Item = AlgoBot;
    type Form = AlgoBotForm;

    fn id(item: &AlgoBot) -> &str {
        &item.id
    }

    fn search_fields(item: &AlgoBot) -> Vec<&str> {
        vec![&item.name, &item.description]
    }

    fn edit_form(item: &AlgoBot) -> Option<AlgoBotForm> {
        Some(AlgoBotForm {
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
            validity: item.validity.chars().take(10).collect(),
            is_active: item.is_active,
        })
    }

    fn active_flag(item: &AlgoBot) -> Option<bool> {
        Some(item.is_active)
    }
}
