use crate::model::{CartItem, Id, NewCartItem};

pub fn position_of_item(cart: &[CartItem], product_id: Id) -> Option<usize> {
    cart.iter().position(|item| item.product_id == product_id)
}

/// Add `new_item` to the cart, merging into an existing line for the same
/// product. A merge only adds quantity; the existing billing and shipping
/// payloads are kept. Returns the resulting line.
pub fn merge_into_cart(cart: &mut Vec<CartItem>, new_item: NewCartItem) -> CartItem {
    if let Some(existing) = cart
        .iter_mut()
        .find(|item| item.product_id == new_item.product_id)
    {
        existing.quantity = existing.quantity.saturating_add(new_item.quantity);
        return existing.clone();
    }

    let item = CartItem::new(new_item);
    cart.push(item.clone());
    item
}
