use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::external::Resource;
use crate::validation::{self, FieldErrors, Validate};

static TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9 &-]+$").unwrap());

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryForm {
    #[schema(example = "Options Trading")]
    pub title: String,
    #[serde(default)]
    pub is_active: bool,
}

impl Validate for CategoryForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(
            "title",
            validation::length(&self.title, "Title", 2, 50).and_then(|_| {
                validation::pattern(
                    &self.title,
                    &TITLE_RE,
                    "Title may only contain letters, numbers, spaces, '&' and '-'",
                )
            }),
        );
        errors.into_result()
    }
}

pub struct Categories;

impl Resource for Categories {
    const PATH: &'static str = "categories";
    const SLUG: &'static str = "categories";
    const LABEL: &'static str = "Category";
    const TOGGLEABLE: bool = true;

    type Item = Category;
    type Form = CategoryForm;

    fn id(item: &Category) -> &str {
        &item.id
    }

    fn search_fields(item: &Category) -> Vec<&str> {
        vec![&item.title]
    }

    fn edit_form(item: &Category) -> Option<CategoryForm> {
        Some(CategoryForm {
            title: item.title.clone(),
            is_active: item.is_active,
        })
    }

    fn active_flag(item: &Category) -> Option<bool> {
        Some(item.is_active)
    }
}
