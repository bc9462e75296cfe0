use crate::error::Result;
use crate::model::{CartItem, CartView, Id, NewCartItem, NewProduct, Product, ShippingBillingUpdate};

/// Catalog operations. Missing products are reported as `None`/`false`, never
/// as errors; errors are reserved for the backing storage.
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>>;
    async fn get_product(&self, id: Id) -> Result<Option<Product>>;
    /// Assign an id, append, and persist the whole catalog
    async fn create_product(&self, new_product: NewProduct) -> Result<Product>;
    async fn delete_product(&self, id: Id) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait CartStore: Send + Sync {
    /// `None` when the product does not exist; the cart is left untouched
    async fn add_item(&self, new_item: NewCartItem) -> Result<Option<CartItem>>;
    /// `None` when no cart line references the product
    async fn update_shipping_billing(
        &self,
        product_id: Id,
        update: ShippingBillingUpdate,
    ) -> Result<Option<CartItem>>;
    async fn remove_item(&self, product_id: Id) -> Result<bool>;
    /// Raw cart lines as persisted, including lines whose product is gone
    async fn list_items(&self) -> Result<Vec<CartItem>>;
    /// Cart joined against the catalog with derived totals
    async fn view_cart(&self) -> Result<CartView>;
}

pub trait Store: CatalogStore + CartStore + Send + Sync {}
