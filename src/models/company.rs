use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::external::Resource;
use crate::validation::{self, FieldErrors, Validate};

/// Bot provider (broker / platform a bot runs on).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub company_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyForm {
    #[schema(example = "Zerodha")]
    pub company_name: String,
}

impl Validate for CompanyForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(
            "companyName",
            validation::length(&self.company_name, "Company name", 2, 100),
        );
        errors.into_result()
    }
}

pub struct Companies;

impl Resource for Companies {
    const PATH: &'static str = "botProvider";
    const SLUG: &'static str = "companies";
    const LABEL: &'static str = "Company";

    type Item = Company;
    type Form = CompanyForm;

    fn id(item: &Company) -> &str {
        &item.id
    }

    fn search_fields(item: &Company) -> Vec<&str> {
        vec![&item.company_name]
    }

    fn edit_form(item: &Company) -> Option<CompanyForm> {
        Some(CompanyForm {
            company_name: item.company_name.clone(),
        })
    }
}
