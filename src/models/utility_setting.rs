use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::external::Resource;
use crate::validation::{self, FieldErrors, Validate};

static KEY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

/// Site-wide key/value setting (support phone, GST rate, banner text...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilitySetting {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UtilitySettingForm {
    #[schema(example = "support_phone")]
    pub key: String,
    pub value: String,
}

impl Validate for UtilitySettingForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(
            "key",
            validation::length(&self.key, "Key", 2, 50).and_then(|_| {
                validation::pattern(
                    &self.key,
                    &KEY_RE,
                    "Key may only contain letters, digits and underscores",
                )
            }),
        );
        errors.check("value", validation::required(&self.value, "Value"));
        errors.into_result()
    }
}

pub struct UtilitySettings;

impl Resource for UtilitySettings {
    const PATH: &'static str = "utilitySetting";
    const SLUG: &'static str = "settings";
    const LABEL: &'static str = "Setting";

    type Item = UtilitySetting;
    type Form = UtilitySettingForm;

    fn id(item: &UtilitySetting) -> &str {
        &item.id
    }

    fn search_fields(item: &UtilitySetting) -> Vec<&str> {
        vec![&item.key, &item.value]
    }

    fn edit_form(item: &UtilitySetting) -> Option<UtilitySettingForm> {
        Some(UtilitySettingForm {
            key: item.key.clone(),
            value: item.value.clone(),
        })
    }
}
