use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::external::Resource;
use crate::validation::{self, FieldErrors, Validate};

/// Paid telegram channel customers subscribe to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelegramChannel {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub channel_name: String,
    #[serde(default)]
    pub channel_link: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TelegramChannelForm {
    #[schema(example = "Nifty Options Calls")]
    pub channel_name: String,
    #[schema(example = "https://t.me/niftycalls")]
    pub channel_link: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_active: bool,
}

fn telegram_link(link: &str) -> validation::RuleResult {
    validation::url(link, "Channel link")?;
    let host = reqwest::Url::parse(link.trim())
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default();
    if host == "t.me" || host == "telegram.me" {
        Ok(())
    } else {
        Err("Channel link must be a t.me link".to_string())
    }
}

impl Validate for TelegramChannelForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(
            "channelName",
            validation::length(&self.channel_name, "Channel name", 3, 50),
        );
        errors.check("channelLink", telegram_link(&self.channel_link));
        errors.check(
            "description",
            validation::length(&self.description, "Description", 0, 500),
        );
        errors.into_result()
    }
}

pub struct TelegramChannels;

impl Resource for TelegramChannels {
    const PATH: &'static str = "telegram";
    const SLUG: &'static str = "telegram";
    const LABEL: &'static str = "Telegram channel";
    const TOGGLEABLE: bool = true;

    type Item = TelegramChannel;
    type Form = TelegramChannelForm;

    fn id(item: &TelegramChannel) -> &str {
        &item.id
    }

    fn search_fields(item: &TelegramChannel) -> Vec<&str> {
        vec![&item.channel_name, &item.description]
    }

    fn edit_form(item: &TelegramChannel) -> Option<TelegramChannelForm> {
        Some(TelegramChannelForm {
            channel_name: item.channel_name.clone(),
            channel_link: item.channel_link.clone(),
            description: item.description.clone(),
            is_active: item.is_active,
        })
    }

    fn active_flag(item: &TelegramChannel) -> Option<bool> {
        Some(item.is_active)
    }
}

/// Subscription plan for a telegram channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelegramPlan {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub telegram_id: String,
    pub plan_name: String,
    #[serde(default)]
    pub duration_days: u32,
    #[serde(default)]
    pub price: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TelegramPlanForm {
    pub telegram_id: String,
    #[schema(example = "Quarterly")]
    pub plan_name: String,
    #[schema(example = 90)]
    pub duration_days: i64,
    #[schema(example = 2499.0)]
    pub price: f64,
}

impl Validate for TelegramPlanForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(
            "telegramId",
            validation::required(&self.telegram_id, "Telegram channel"),
        );
        errors.check(
            "planName",
            validation::length(&self.plan_name, "Plan name", 2, 50),
        );
        errors.check(
            "durationDays",
            validation::range(self.duration_days, "Duration", 1, 3650),
        );
        errors.check("price", validation::at_least(self.price, "Price", 0.0));
        errors.into_result()
    }
}

pub struct TelegramPlans;

impl Resource for TelegramPlans {
    const PATH: &'static str = "telegramPlan";
    const SLUG: &'static str = "telegram-plans";
    const LABEL: &'static str = "Telegram plan";

    type Item = TelegramPlan;
    type Form = TelegramPlanForm;

    fn id(item: &TelegramPlan) -> &str {
        &item.id
    }

    fn search_fields(item: &TelegramPlan) -> Vec<&str> {
        vec![&item.plan_name]
    }

    fn edit_form(item: &TelegramPlan) -> Option<TelegramPlanForm> {
        Some(TelegramPlanForm {
            telegram_id: item.telegram_id.clone(),
            plan_name: item.plan_name.clone(),
            duration_days: item.duration_days as i64,
            price: item.price,
        })
    }
}
