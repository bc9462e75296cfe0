use crate::model::Id;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Keeps an explicit `null` as `Some(Value::Null)`. Paired with
/// `#[serde(default)]` only an absent key becomes `None`.
pub(crate) fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// A cart line, keyed by the product it references.
///
/// `billing_info` and `shipping_info` are opaque to the backend and are always
/// replaced as a whole. An absent payload is left out of the file, an explicit
/// `null` is written back as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: Id,
    pub quantity: i64,
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub billing_info: Option<Value>,
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub shipping_info: Option<Value>,
}

impl CartItem {
    pub fn new(new_item: NewCartItem) -> Self {
        Self {
            product_id: new_item.product_id,
            quantity: new_item.quantity,
            billing_info: new_item.billing_info,
            shipping_info: new_item.shipping_info,
        }
    }

    pub fn apply(&mut self, update: ShippingBillingUpdate) {
        self.billing_info = update.billing_info;
        self.shipping_info = update.shipping_info;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub product_id: Id,
    pub quantity: i64,
    pub billing_info: Option<Value>,
    pub shipping_info: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingBillingUpdate {
    #[serde(default, deserialize_with = "present_value")]
    pub billing_info: Option<Value>,
    #[serde(default, deserialize_with = "present_value")]
    pub shipping_info: Option<Value>,
}

/// One rendered cart line joined with its product
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartViewItem {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub product_id: Id,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub price: f64,
    pub total_amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartViewItem>,
    pub total_quantity: i64,
    pub total_price: f64,
}
