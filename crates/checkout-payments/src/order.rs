//! Orders API Payloads
//!
//! Request body for `POST /v2/checkout/orders` and the fields read back from
//! the provider's order object.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::PayPalConfig;
use crate::error::{PaymentError, Result};

/// Only currency the checkout sells in
pub const CURRENCY: &str = "USD";

/// Amount in a currency, formatted to two decimals
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Money {
    pub currency_code: String,
    pub value: String,
}

impl Money {
    pub fn usd(amount: Decimal) -> Self {
        Self {
            currency_code: CURRENCY.into(),
            value: format!("{:.2}", amount.round_dp(2)),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Item {
    pub name: String,
    pub description: String,
    pub quantity: String,
    pub unit_amount: Money,
}

#[derive(Clone, Debug, Serialize)]
pub struct AmountBreakdown {
    pub item_total: Money,
}

#[derive(Clone, Debug, Serialize)]
pub struct Amount {
    pub currency_code: String,
    pub value: String,
    pub breakdown: AmountBreakdown,
}

#[derive(Clone, Debug, Serialize)]
pub struct PurchaseUnit {
    pub items: Vec<Item>,
    pub amount: Amount,
}

/// Buyer experience on the hosted approval page
#[derive(Clone, Debug, Serialize)]
pub struct ExperienceContext {
    pub payment_method_preference: &'static str,
    pub user_action: &'static str,
    pub return_url: String,
    pub cancel_url: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct PayPalSource {
    pub experience_context: ExperienceContext,
}

#[derive(Clone, Debug, Serialize)]
pub struct PaymentSource {
    pub paypal: PayPalSource,
}

/// Order creation request
#[derive(Clone, Debug, Serialize)]
pub struct OrderRequest {
    pub intent: &'static str,
    pub purchase_units: Vec<PurchaseUnit>,
    pub payment_source: PaymentSource,
}

impl OrderRequest {
    /// Capture-intent order for the configured item, quantity one
    pub fn single_item(config: &PayPalConfig) -> Self {
        let price = Money::usd(config.item.price);

        Self {
            intent: "CAPTURE",
            purchase_units: vec![PurchaseUnit {
                items: vec![Item {
                    name: config.item.name.clone(),
                    description: config.item.description.clone(),
                    quantity: "1".into(),
                    unit_amount: price.clone(),
                }],
                amount: Amount {
                    currency_code: price.currency_code.clone(),
                    value: price.value.clone(),
                    breakdown: AmountBreakdown { item_total: price },
                },
            }],
            payment_source: PaymentSource {
                paypal: PayPalSource {
                    experience_context: ExperienceContext {
                        payment_method_preference: "IMMEDIATE_PAYMENT_REQUIRED",
                        user_action: "PAY_NOW",
                        return_url: config.return_url(),
                        cancel_url: config.cancel_url(),
                    },
                },
            },
        }
    }
}

/// Provider order as returned by creation
#[derive(Clone, Debug)]
pub struct CreatedOrder {
    pub id: String,
    pub status: Option<String>,
    /// Full provider payload
    pub raw: serde_json::Value,
}

impl CreatedOrder {
    pub fn from_raw(raw: serde_json::Value) -> Result<Self> {
        let id = raw
            .get("id")
            .and_then(serde_json::Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| PaymentError::Decode("order response has no id".into()))?
            .to_string();
        let status = raw
            .get("status")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned);

        Ok(Self { id, status, raw })
    }
}
