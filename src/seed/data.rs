use crate::model::NewProduct;
use crate::store::traits::Store;
use anyhow::{Context, Result};

fn demo_products() -> Vec<NewProduct> {
    vec![
        NewProduct {
            name: "Canvas Tote".to_string(),
            price: 18.0,
            description: "Heavy cotton tote bag with inner pocket".to_string(),
        },
        NewProduct {
            name: "Enamel Mug".to_string(),
            price: 12.5,
            description: "12oz camp mug, dishwasher safe".to_string(),
        },
        NewProduct {
            name: "Wool Beanie".to_string(),
            price: 24.0,
            description: "Merino knit, one size".to_string(),
        },
    ]
}

/// Fill an empty catalog with a few demo products. Returns how many were created.
///
/// Goes through the regular create path, so ids and persistence behave exactly
/// as they do for API-created products.
pub async fn load_seed_data<S: Store>(store: &S) -> Result<usize> {
    if !store.list_products().await?.is_empty() {
        log::info!("Catalog already has products, skipping seed data");
        return Ok(0);
    }

    let products = demo_products();
    let count = products.len();
    for product in products {
        let name = product.name.clone();
        store
            .create_product(product)
            .await
            .with_context(|| format!("Failed to seed product '{name}'"))?;
    }

    Ok(count)
}
