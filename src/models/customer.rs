use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::external::Resource;
use crate::utils::{normalize_phone, validate_phone};
use crate::validation::{self, FieldErrors, Validate};

static PERSON_NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z ]+$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub role_id: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerForm {
    #[schema(example = "Asha Verma")]
    pub name: String,
    #[schema(example = "asha@example.com")]
    pub email: String,
    #[schema(example = "+919876543210")]
    pub phone: String,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub role_id: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

impl Validate for CustomerForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(
            "name",
            validation::length(&self.name, "Name", 2, 50).and_then(|_| {
                validation::pattern(
                    &self.name,
                    &PERSON_NAME_RE,
                    "Name may only contain letters and spaces",
                )
            }),
        );
        errors.check("email", validation::email(&self.email));
        errors.check("phone", validate_phone(&self.phone));
        if let Some(birthday) = self.birthday.as_deref().filter(|b| !b.trim().is_empty()) {
            errors.check(
                "birthday",
                validation::date(birthday, "Birthday")
                    .and_then(|d| validation::not_in_future(d, "Birthday")),
            );
        }
        errors.into_result()
    }
}

pub struct Customers;

impl Resource for Customers {
    const PATH: &'static str = "user";
    const SLUG: &'static str = "customers";
    const LABEL: &'static str = "Customer";
    const TOGGLEABLE: bool = true;
    const SERVER_SEARCH: bool = true;
    const DEBOUNCE_SEARCH: bool = true;

    type Item = Customer;
    type Form = CustomerForm;

    fn id(item: &Customer) -> &str {
        &item.id
    }

    fn search_fields(item: &Customer) -> Vec<&str> {
        vec![&item.name, &item.email, &item.phone]
    }

    fn prepare(mut form: CustomerForm) -> CustomerForm {
        form.email = form.email.trim().to_ascii_lowercase();
        form.phone = normalize_phone(&form.phone);
        form
    }

    fn edit_form(item: &Customer) -> Option<CustomerForm> {
        Some(CustomerForm {
            name: item.name.clone(),
            email: item.email.clone(),
            phone: item.phone.clone(),
            gender: item.gender,
            birthday: item
                .birthday
                .as_ref()
                .map(|b| b.chars().take(10).collect()),
            location: item.location.clone(),
            role_id: item.role_id.clone(),
            is_active: item.is_active,
        })
    }

    fn active_flag(item: &Customer) -> Option<bool> {
        Some(item.is_active)
    }
}
