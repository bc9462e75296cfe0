use crate::api::handlers::{
    bad_request, not_found, storage_failure, AppState, MessageResponse, PRODUCT_NOT_FOUND,
};
use crate::api::id_extractor::PathId;
use crate::error::MissingField;
use crate::model::cart::present_value;
use crate::model::{CartView, Id, NewCartItem, ShippingBillingUpdate};
use crate::store::traits::Store;
use axum::{extract::State, http::StatusCode, response::Json, Json as RequestJson};
use log::debug;
use serde::Deserialize;
use serde_json::Value;

pub const ITEM_NOT_FOUND: &str = "Item not found in cart";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemRequest {
    pub product_id: Option<Id>,
    pub quantity: Option<i64>,
    #[serde(default, deserialize_with = "present_value")]
    pub billing_info: Option<Value>,
    #[serde(default, deserialize_with = "present_value")]
    pub shipping_info: Option<Value>,
}

impl AddCartItemRequest {
    pub fn into_new_item(self) -> Result<NewCartItem, MissingField> {
        Ok(NewCartItem {
            product_id: self.product_id.ok_or(MissingField::new("productId"))?,
            quantity: self.quantity.ok_or(MissingField::new("quantity"))?,
            billing_info: self.billing_info,
            shipping_info: self.shipping_info,
        })
    }
}

/// POST /cart
/// Add a product to the cart, or add to the quantity of its existing line
pub async fn add_to_cart<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(request): RequestJson<AddCartItemRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), (StatusCode, Json<MessageResponse>)> {
    let new_item = request.into_new_item().map_err(bad_request)?;

    match store.add_item(new_item).await {
        Ok(Some(_)) => Ok((
            StatusCode::CREATED,
            Json(MessageResponse::new("Item added to cart successfully")),
        )),
        Ok(None) => Err(not_found(PRODUCT_NOT_FOUND)),
        Err(e) => Err(storage_failure(e)),
    }
}

/// PUT /cart/{product_id}
/// Replace the billing and shipping info of a cart line
pub async fn update_cart_item<S: Store>(
    State(store): State<AppState<S>>,
    PathId(id): PathId,
    RequestJson(update): RequestJson<ShippingBillingUpdate>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<MessageResponse>)> {
    let Some(product_id) = id else {
        return Err(not_found(ITEM_NOT_FOUND));
    };

    match store.update_shipping_billing(product_id, update).await {
        Ok(Some(_)) => Ok(Json(MessageResponse::new(
            "Billing and shipping information updated successfully",
        ))),
        Ok(None) => Err(not_found(ITEM_NOT_FOUND)),
        Err(e) => Err(storage_failure(e)),
    }
}

/// GET /cart
pub async fn view_cart<S: Store>(
    State(store): State<AppState<S>>,
) -> Result<Json<CartView>, (StatusCode, Json<MessageResponse>)> {
    let view = store.view_cart().await.map_err(storage_failure)?;
    debug!("Cart view: {:?}", view.items);
    Ok(Json(view))
}

/// DELETE /cart/{product_id}
pub async fn remove_cart_item<S: Store>(
    State(store): State<AppState<S>>,
    PathId(id): PathId,
) -> Result<Json<MessageResponse>, (StatusCode, Json<MessageResponse>)> {
    let Some(product_id) = id else {
        return Err(not_found(ITEM_NOT_FOUND));
    };

    match store.remove_item(product_id).await {
        Ok(true) => Ok(Json(MessageResponse::new(
            "Item removed from cart successfully",
        ))),
        Ok(false) => Err(not_found(ITEM_NOT_FOUND)),
        Err(e) => Err(storage_failure(e)),
    }
}
