use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::external::Resource;
use crate::validation::{self, FieldErrors, Validate};

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9 ]+$").unwrap());

/// Provider reference; the backend sends either the bare id or the populated company.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderRef {
    Id(String),
    Populated {
        #[serde(rename = "_id", alias = "id")]
        id: String,
        #[serde(rename = "companyName", default)]
        company_name: String,
    },
}

impl ProviderRef {
    pub fn id(&self) -> &str {
        match self {
            ProviderRef::Id(id) => id,
            ProviderRef::Populated { id, .. } => id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            ProviderRef::Id(id) => id,
            ProviderRef::Populated { company_name, .. } => company_name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bot {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub bot_provider_id: ProviderRef,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BotForm {
    #[schema(example = "My Bot 1")]
    pub name: String,
    pub bot_provider_id: String,
}

impl Validate for BotForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(
            "name",
            validation::length(&self.name, "Bot name", 3, 50).and_then(|_| {
                validation::pattern(
                    &self.name,
                    &NAME_RE,
                    "Bot name may only contain letters, numbers and spaces",
                )
            }),
        );
        errors.check(
            "botProviderId",
            validation::required(&self.bot_provider_id, "Bot provider"),
        );
        errors.into_result()
    }
}

pub struct Bots;

impl Resource for Bots {
    const PATH: &'static str = "bot";
    const SLUG: &'static str = "bots";
    const LABEL: &'static str = "Bot";

    type Item = Bot;
    type Form = BotForm;

    fn id(item: &Bot) -> &str {
        &item.id
    }

    fn search_fields(item: &Bot) -> Vec<&str> {
        vec![&item.name, item.bot_provider_id.display_name()]
    }

    fn edit_form(item: &Bot) -> Option<BotForm> {
        Some(BotForm {
            name: item.name.clone(),
            bot_provider_id: item.bot_provider_id.id().to_string(),
        })
    }
}
