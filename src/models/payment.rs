use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::external::{NoForm, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Completed => write!(f, "completed"),
            PaymentStatus::Failed => write!(f, "failed"),
            PaymentStatus::Refunded => write!(f, "refunded"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Course,
    Algobot,
    Telegram,
    Other,
}

/// A purchase as recorded by the backend. The dashboard never edits these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Bare user id or the populated user document.
    #[serde(default)]
    pub user_id: Value,
    pub amount: f64,
    pub status: PaymentStatus,
    pub item_type: ItemType,
    #[serde(default)]
    pub course_id: Option<Value>,
    #[serde(default)]
    pub bot_id: Option<Value>,
    #[serde(default)]
    pub telegram_id: Option<Value>,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Flattened copy of the payer's name/email for searching.
    #[serde(skip)]
    pub payer: String,
}

impl Payment {
    fn fill_payer(&mut self) {
        self.payer = match &self.user_id {
            Value::String(id) => id.clone(),
            Value::Object(map) => ["name", "email"]
                .iter()
                .filter_map(|k| map.get(*k).and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join(" "),
            _ => String::new(),
        };
    }

    pub fn status_label(&self) -> String {
        self.status.to_string()
    }
}

pub struct Payments;

impl Resource for Payments {
    const PATH: &'static str = "payment";
    const SLUG: &'static str = "payments";
    const LABEL: &'static str = "Payment";
    const EDITABLE: bool = false;
    const DELETABLE: bool = false;

    type Item = Payment;
    type Form = NoForm;

    fn id(item: &Payment) -> &str {
        &item.id
    }

    fn search_fields(item: &Payment) -> Vec<&str> {
        vec![&item.payer]
    }

    fn after_fetch(items: &mut [Payment]) {
        for payment in items.iter_mut() {
            payment.fill_payer();
        }
    }
}
