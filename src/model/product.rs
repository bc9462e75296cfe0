use crate::model::Id;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Id,
    pub name: String,
    pub price: f64,
    pub description: String,
    /// Display fields only present when supplied outside the API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Product {
    pub fn new(id: Id, new_product: NewProduct) -> Self {
        Self {
            id,
            name: new_product.name,
            price: new_product.price,
            description: new_product.description,
            image: None,
            title: None,
        }
    }
}

/// Input model for creating a product; the id is assigned by the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub description: String,
}
