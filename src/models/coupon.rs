use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::external::Resource;
use crate::validation::{self, FieldErrors, Validate};

static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z0-9]+$").unwrap());

pub const DISCOUNT_MIN: i64 = 1;
pub const DISCOUNT_MAX: i64 = 99;
pub const USAGE_LIMIT_MIN: i64 = 1;
pub const USAGE_LIMIT_MAX: i64 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub code: String,
    pub discount_percent: i64,
    #[serde(default)]
    pub expiry_date: String,
    #[serde(default)]
    pub usage_limit: i64,
    #[serde(default)]
    pub usage_count: i64,
}

impl Coupon {
    pub fn remaining_uses(&self) -> i64 {
        (self.usage_limit - self.usage_count).max(0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CouponForm {
    #[schema(example = "DIWALI25")]
    pub code: String,
    #[schema(example = 25)]
    pub discount_percent: i64,
    #[schema(example = "2026-11-30")]
    pub expiry_date: String,
    #[schema(example = 100)]
    pub usage_limit: i64,
}

impl CouponForm {
    /// Codes are typed case-insensitively and stored uppercase.
    pub fn normalized(mut self) -> Self {
        self.code = self.code.trim().to_ascii_uppercase();
        self
    }
}

impl Validate for CouponForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(
            "code",
            validation::length(&self.code, "Code", 3, 20).and_then(|_| {
                validation::pattern(
                    &self.code,
                    &CODE_RE,
                    "Code may only contain uppercase letters and digits",
                )
            }),
        );
        errors.check(
            "discountPercent",
            validation::range(self.discount_percent, "Discount", DISCOUNT_MIN, DISCOUNT_MAX)
                .map_err(|e| format!("{e}%")),
        );
        errors.check(
            "expiryDate",
            validation::date(&self.expiry_date, "Expiry date")
                .and_then(|d| validation::not_in_past(d, "Expiry date")),
        );
        errors.check(
            "usageLimit",
            validation::range(
                self.usage_limit,
                "Usage limit",
                USAGE_LIMIT_MIN,
                USAGE_LIMIT_MAX,
            ),
        );
        errors.into_result()
    }
}

pub struct Coupons;

impl Resource for Coupons {
    const PATH: &'static str = "coupon";
    const SLUG: &'static str = "coupons";
    const LABEL: &'static str = "Coupon";

    type Item = Coupon;
    type Form = CouponForm;

    fn id(item: &Coupon) -> &str {
        &item.id
    }

    fn search_fields(item: &Coupon) -> Vec<&str> {
        vec![&item.code]
    }

    fn prepare(form: CouponForm) -> CouponForm {
        form.normalized()
    }

    fn edit_form(item: &Coupon) -> Option<CouponForm> {
        Some(CouponForm {
            code: item.code.clone(),
            discount_percent: item.discount_percent,
            expiry_date: item.expiry_date.chars().take(10).collect(),
            usage_limit: item.usage_limit,
        })
    }
}
