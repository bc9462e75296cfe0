use std::path::Path;

use log::{debug, info};

use crate::config::StorageConfig;
use crate::error::{Result, StoreError};
use crate::logic::{
    build_cart_view, find_product, merge_into_cart, next_product_id, position_of_item,
    position_of_product,
};
use crate::model::{
    CartItem, CartView, Id, IdAssignment, NewCartItem, NewProduct, Product, ShippingBillingUpdate,
};
use crate::store::json_file::JsonCollection;
use crate::store::traits::{CartStore, CatalogStore, Store};

/// Catalog and cart, each mirrored to its own JSON file.
///
/// Lock order is catalog before cart. Nothing holds the cart lock while
/// waiting on the catalog.
#[derive(Debug)]
pub struct FileStore {
    products: JsonCollection<Product>,
    cart: JsonCollection<CartItem>,
    id_assignment: IdAssignment,
}

impl FileStore {
    /// Load both collections. Must finish before the server starts accepting
    /// requests.
    pub async fn open(storage: &StorageConfig, id_assignment: IdAssignment) -> Result<Self> {
        let products = JsonCollection::load(&storage.products_path, storage.create_missing).await?;
        let cart = JsonCollection::load(&storage.cart_path, storage.create_missing).await?;

        let product_count = products.read().await.len();
        let cart_count = cart.read().await.len();
        info!(
            "Loaded {} products from {} and {} cart items from {}",
            product_count, storage.products_path, cart_count, storage.cart_path
        );

        Ok(Self::from_collections(products, cart, id_assignment))
    }

    pub fn from_collections(
        products: JsonCollection<Product>,
        cart: JsonCollection<CartItem>,
        id_assignment: IdAssignment,
    ) -> Self {
        Self {
            products,
            cart,
            id_assignment,
        }
    }

    pub fn products_path(&self) -> &Path {
        self.products.path()
    }

    pub fn cart_path(&self) -> &Path {
        self.cart.path()
    }
}

#[async_trait::async_trait]
impl CatalogStore for FileStore {
    async fn list_products(&self) -> Result<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }

    async fn get_product(&self, id: Id) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(find_product(&products, id).cloned())
    }

    async fn create_product(&self, new_product: NewProduct) -> Result<Product> {
        let assignment = self.id_assignment;
        let product = self
            .products
            .try_update(move |products| {
                let id = next_product_id(products, assignment).ok_or_else(|| {
                    StoreError::IdsExhausted {
                        max_id: products.iter().map(|p| p.id).max().unwrap_or_default(),
                    }
                })?;
                let product = Product::new(id, new_product);
                products.push(product.clone());
                Ok(product)
            })
            .await?;

        debug!("Created product {} ({})", product.id, product.name);
        Ok(product)
    }

    async fn delete_product(&self, id: Id) -> Result<bool> {
        let removed = self
            .products
            .update_if(|products| {
                let index = position_of_product(products, id)?;
                Some(products.remove(index))
            })
            .await?;

        if removed.is_some() {
            debug!("Deleted product {id}");
        }
        Ok(removed.is_some())
    }
}

#[async_trait::async_trait]
impl CartStore for FileStore {
    async fn add_item(&self, new_item: NewCartItem) -> Result<Option<CartItem>> {
        // Held until the cart is written so the product cannot be deleted in between
        let products = self.products.read().await;
        if find_product(&products, new_item.product_id).is_none() {
            debug!("Rejected cart add for unknown product {}", new_item.product_id);
            return Ok(None);
        }

        let item = self
            .cart
            .update(move |cart| merge_into_cart(cart, new_item))
            .await?;
        drop(products);

        debug!(
            "Cart line for product {} now has quantity {}",
            item.product_id, item.quantity
        );
        Ok(Some(item))
    }

    async fn update_shipping_billing(
        &self,
        product_id: Id,
        update: ShippingBillingUpdate,
    ) -> Result<Option<CartItem>> {
        self.cart
            .update_if(move |cart| {
                let item = cart.iter_mut().find(|item| item.product_id == product_id)?;
                item.apply(update);
                Some(item.clone())
            })
            .await
    }

    async fn remove_item(&self, product_id: Id) -> Result<bool> {
        let removed = self
            .cart
            .update_if(|cart| {
                let index = position_of_item(cart, product_id)?;
                Some(cart.remove(index))
            })
            .await?;

        Ok(removed.is_some())
    }

    async fn list_items(&self) -> Result<Vec<CartItem>> {
        Ok(self.cart.read().await.clone())
    }

    async fn view_cart(&self) -> Result<CartView> {
        let products = self.products.read().await;
        let cart = self.cart.read().await;
        Ok(build_cart_view(&products, &cart))
    }
}

impl Store for FileStore {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tempfile::{tempdir, TempDir};

    async fn open_store(assignment: IdAssignment) -> (TempDir, FileStore) {
        let dir = tempdir().unwrap();
        let storage = StorageConfig {
            products_path: dir.path().join("products.json").display().to_string(),
            cart_path: dir.path().join("cart.json").display().to_string(),
            create_missing: true,
        };
        let store = FileStore::open(&storage, assignment).await.unwrap();
        (dir, store)
    }

    fn new_product(name: &str, price: f64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price,
            description: format!("{name} description"),
        }
    }

    fn new_item(product_id: Id, quantity: i64) -> NewCartItem {
        NewCartItem {
            product_id,
            quantity,
            billing_info: None,
            shipping_info: None,
        }
    }

    #[tokio::test]
    async fn test_created_ids_increase_from_one() {
        let (_dir, store) = open_store(IdAssignment::default()).await;

        let mut ids = Vec::new();
        for name in ["a", "b", "c", "d"] {
            ids.push(store.create_product(new_product(name, 1.0)).await.unwrap().id);
        }
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_get_after_create_and_delete() {
        let (_dir, store) = open_store(IdAssignment::default()).await;

        let created = store.create_product(new_product("lamp", 20.0)).await.unwrap();
        assert_eq!(store.get_product(created.id).await.unwrap(), Some(created.clone()));

        assert!(store.delete_product(created.id).await.unwrap());
        assert_eq!(store.get_product(created.id).await.unwrap(), None);
        assert!(!store.delete_product(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_sequential_assignment_reproduces_collision() {
        let (_dir, store) = open_store(IdAssignment::Sequential).await;
        for name in ["a", "b", "c"] {
            store.create_product(new_product(name, 1.0)).await.unwrap();
        }

        store.delete_product(2).await.unwrap();
        let created = store.create_product(new_product("d", 1.0)).await.unwrap();
        assert_eq!(created.id, 3);

        let ids: Vec<Id> = store
            .list_products()
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1, 3, 3]);
    }

    #[tokio::test]
    async fn test_catalog_is_persisted_on_every_mutation() {
        let (_dir, store) = open_store(IdAssignment::default()).await;
        store.create_product(new_product("a", 1.0)).await.unwrap();
        store.create_product(new_product("b", 2.0)).await.unwrap();
        store.delete_product(1).await.unwrap();

        let on_disk: Vec<Product> =
            serde_json::from_slice(&std::fs::read(store.products_path()).unwrap()).unwrap();
        assert_eq!(on_disk, store.list_products().await.unwrap());
        assert_eq!(on_disk.len(), 1);
        assert_eq!(on_disk[0].name, "b");
    }

    #[tokio::test]
    async fn test_add_item_requires_existing_product() {
        let (_dir, store) = open_store(IdAssignment::default()).await;

        assert_eq!(store.add_item(new_item(7, 1)).await.unwrap(), None);
        assert!(store.list_items().await.unwrap().is_empty());
        assert!(!store.cart_path().exists());
    }

    #[tokio::test]
    async fn test_add_item_twice_merges() {
        let (_dir, store) = open_store(IdAssignment::default()).await;
        store.create_product(new_product("a", 10.0)).await.unwrap();

        store.add_item(new_item(1, 2)).await.unwrap();
        let merged = store.add_item(new_item(1, 3)).await.unwrap().unwrap();

        assert_eq!(merged.quantity, 5);
        assert_eq!(store.list_items().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_replaces_payloads() {
        let (_dir, store) = open_store(IdAssignment::default()).await;
        store.create_product(new_product("a", 10.0)).await.unwrap();
        store
            .add_item(NewCartItem {
                billing_info: Some(json!({"card": "visa", "zip": "12345"})),
                shipping_info: Some(json!({"street": "Main"})),
                ..new_item(1, 1)
            })
            .await
            .unwrap();

        let updated = store
            .update_shipping_billing(
                1,
                ShippingBillingUpdate {
                    billing_info: Some(json!({"card": "amex"})),
                    shipping_info: None,
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.billing_info, Some(json!({"card": "amex"})));
        assert_eq!(updated.shipping_info, None);

        let missing = store
            .update_shipping_billing(2, ShippingBillingUpdate::default())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_explicit_null_is_written_to_file() {
        let (_dir, store) = open_store(IdAssignment::default()).await;
        store.create_product(new_product("a", 10.0)).await.unwrap();
        store
            .add_item(NewCartItem {
                billing_info: Some(json!({"card": "visa"})),
                ..new_item(1, 1)
            })
            .await
            .unwrap();

        let update: ShippingBillingUpdate =
            serde_json::from_value(json!({"billingInfo": null})).unwrap();
        store.update_shipping_billing(1, update).await.unwrap().unwrap();

        let on_disk: Value =
            serde_json::from_slice(&std::fs::read(store.cart_path()).unwrap()).unwrap();
        assert_eq!(on_disk[0].get("billingInfo"), Some(&Value::Null));
        assert!(on_disk[0].get("shippingInfo").is_none());
    }

    #[tokio::test]
    async fn test_remove_item() {
        let (_dir, store) = open_store(IdAssignment::default()).await;
        store.create_product(new_product("a", 10.0)).await.unwrap();
        store.add_item(new_item(1, 1)).await.unwrap();

        assert!(store.remove_item(1).await.unwrap());
        assert!(!store.remove_item(1).await.unwrap());
        assert!(store.view_cart().await.unwrap().items.is_empty());
    }

    #[tokio::test]
    async fn test_orphans_stay_persisted_but_leave_the_view() {
        let (_dir, store) = open_store(IdAssignment::default()).await;
        store.create_product(new_product("A", 10.0)).await.unwrap();
        store.add_item(new_item(1, 3)).await.unwrap();

        let view = store.view_cart().await.unwrap();
        assert_eq!(view.total_quantity, 3);
        assert_eq!(view.total_price, 30.0);

        store.delete_product(1).await.unwrap();

        let view = store.view_cart().await.unwrap();
        assert!(view.items.is_empty());
        assert_eq!(view.total_quantity, 0);
        assert_eq!(view.total_price, 0.0);

        let on_disk: Vec<CartItem> =
            serde_json::from_slice(&std::fs::read(store.cart_path()).unwrap()).unwrap();
        assert_eq!(on_disk.len(), 1);
        assert_eq!(on_disk[0].product_id, 1);
    }

    #[tokio::test]
    async fn test_reopen_restores_state() {
        let dir = tempdir().unwrap();
        let storage = StorageConfig {
            products_path: dir.path().join("products.json").display().to_string(),
            cart_path: dir.path().join("cart.json").display().to_string(),
            create_missing: true,
        };

        let store = FileStore::open(&storage, IdAssignment::default()).await.unwrap();
        store.create_product(new_product("a", 1.5)).await.unwrap();
        store.create_product(new_product("b", 2.5)).await.unwrap();
        store.add_item(new_item(2, 4)).await.unwrap();
        let products = store.list_products().await.unwrap();
        let cart = store.list_items().await.unwrap();
        drop(store);

        let reopened = FileStore::open(&storage, IdAssignment::default()).await.unwrap();
        assert_eq!(reopened.list_products().await.unwrap(), products);
        assert_eq!(reopened.list_items().await.unwrap(), cart);
    }

    #[tokio::test]
    async fn test_concurrent_adds_do_not_lose_quantity() {
        let (_dir, store) = open_store(IdAssignment::default()).await;
        store.create_product(new_product("a", 1.0)).await.unwrap();
        let store = Arc::new(store);

        let mut handles = Vec::new();
        for _ in 0..20 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.add_item(new_item(1, 1)).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let items = store.list_items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 20);
    }

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_delete_waits_for_pending_add() {
        let (_dir, store) = open_store(IdAssignment::default()).await;
        store.create_product(new_product("a", 1.0)).await.unwrap();
        let store = Arc::new(store);

        // Stall the add between its product check and its cart write
        let cart_reader = store.cart.read().await;
        let add = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.add_item(new_item(1, 1)).await.unwrap() })
        };
        settle().await;

        let delete = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.delete_product(1).await.unwrap() })
        };
        settle().await;
        assert!(!delete.is_finished());

        drop(cart_reader);
        assert!(add.await.unwrap().is_some());
        assert!(delete.await.unwrap());

        assert_eq!(store.list_items().await.unwrap().len(), 1);
        assert_eq!(store.add_item(new_item(1, 1)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_after_max_id_is_an_error() {
        let dir = tempdir().unwrap();
        let products_path = dir.path().join("products.json");
        let max_product = json!([{
            "id": Id::MAX,
            "name": "last",
            "price": 1.0,
            "description": "highest id there is"
        }]);
        std::fs::write(&products_path, max_product.to_string()).unwrap();
        let storage = StorageConfig {
            products_path: products_path.display().to_string(),
            cart_path: dir.path().join("cart.json").display().to_string(),
            create_missing: true,
        };
        let store = FileStore::open(&storage, IdAssignment::NextAfterMax).await.unwrap();

        let err = store.create_product(new_product("a", 1.0)).await.unwrap_err();
        assert!(matches!(err, StoreError::IdsExhausted { max_id } if max_id == Id::MAX));

        let products = store.list_products().await.unwrap();
        assert_eq!(products.len(), 1);
        let on_disk: Value = serde_json::from_slice(&std::fs::read(&products_path).unwrap()).unwrap();
        assert_eq!(on_disk, max_product);
    }

    #[tokio::test]
    async fn test_write_failure_leaves_catalog_untouched() {
        let dir = tempdir().unwrap();
        let storage = StorageConfig {
            products_path: dir.path().join("nope").join("products.json").display().to_string(),
            cart_path: dir.path().join("cart.json").display().to_string(),
            create_missing: true,
        };
        let store = FileStore::open(&storage, IdAssignment::default()).await.unwrap();

        assert!(store.create_product(new_product("a", 1.0)).await.is_err());
        assert!(store.list_products().await.unwrap().is_empty());
    }
}
