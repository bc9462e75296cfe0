use crate::logic::find_product;
use crate::model::{CartItem, CartView, CartViewItem, Id, Product};

/// `price * quantity` for the product, or 0 when it is no longer in the catalog
pub fn product_total(products: &[Product], product_id: Id, quantity: i64) -> f64 {
    match find_product(products, product_id) {
        Some(product) => product.price * quantity as f64,
        None => 0.0,
    }
}

/// Join the cart against the catalog and compute the totals.
///
/// Lines whose product has been deleted are left out of the view; they are not
/// removed from the cart itself. Both aggregates are taken over the rendered
/// lines only, so `total_quantity` always equals the sum of the item quantities.
pub fn build_cart_view(products: &[Product], cart: &[CartItem]) -> CartView {
    let items: Vec<CartViewItem> = cart
        .iter()
        .filter_map(|item| {
            let product = find_product(products, item.product_id)?;
            Some(CartViewItem {
                id: item.product_id,
                name: product.name.clone(),
                description: product.description.clone(),
                product_id: item.product_id,
                quantity: item.quantity,
                image: product.image.clone(),
                title: product.title.clone(),
                price: product.price,
                total_amount: product_total(products, item.product_id, item.quantity),
            })
        })
        .collect();

    let total_quantity = items
        .iter()
        .fold(0i64, |acc, item| acc.saturating_add(item.quantity));
    let total_price = items.iter().map(|item| item.total_amount).sum();

    CartView {
        items,
        total_quantity,
        total_price,
    }
}
