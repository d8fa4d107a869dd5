use serde::{Deserialize, Serialize};

use crate::external::{NoForm, Resource};

/// "Contact us" submission from the public site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSubscriber {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

pub struct Contacts;

impl Resource for Contacts {
    const PATH: &'static str = "contactUs";
    const SLUG: &'static str = "contacts";
    const LABEL: &'static str = "Contact";
    const EDITABLE: bool = false;

    type Item = Contact;
    type Form = NoForm;

    fn id(item: &Contact) -> &str {
        &item.id
    }

    fn search_fields(item: &Contact) -> Vec<&str> {
        vec![&item.name, &item.email, &item.message]
    }
}

pub struct Newsletter;

impl Resource for Newsletter {
    const PATH: &'static str = "newsletter";
    const SLUG: &'static str = "newsletter";
    const LABEL: &'static str = "Subscriber";
    const EDITABLE: bool = false;

    type Item = NewsletterSubscriber;
    type Form = NoForm;

    fn id(item: &NewsletterSubscriber) -> &str {
        &item.id
    }

    fn search_fields(item: &NewsletterSubscriber) -> Vec<&str> {
        vec![&item.email]
    }
}
