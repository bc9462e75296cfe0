use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Json},
    Json as RequestJson,
};
use log::error;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::id_extractor::PathId;
use crate::error::{MissingField, StoreError};
use crate::model::{NewProduct, Product};
use crate::store::traits::Store;

pub type AppState<S> = Arc<S>;

pub const PRODUCT_NOT_FOUND: &str = "Product not found";
pub const STORAGE_FAILURE: &str = "Internal storage error";

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Body of every message-only response, errors included
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductCreatedResponse {
    pub message: String,
    pub product: Product,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
}

impl CreateProductRequest {
    pub fn into_new_product(self) -> Result<NewProduct, MissingField> {
        Ok(NewProduct {
            name: self.name.ok_or(MissingField::new("name"))?,
            price: self.price.ok_or(MissingField::new("price"))?,
            description: self
                .description
                .ok_or(MissingField::new("description"))?,
        })
    }
}

pub(crate) fn not_found(message: &str) -> (StatusCode, Json<MessageResponse>) {
    (StatusCode::NOT_FOUND, Json(MessageResponse::new(message)))
}

pub(crate) fn bad_request(err: MissingField) -> (StatusCode, Json<MessageResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(MessageResponse::new(&err.to_string())),
    )
}

/// Storage failures end the request, not the process. Details such as file
/// paths only go to the log.
pub(crate) fn storage_failure(err: StoreError) -> (StatusCode, Json<MessageResponse>) {
    error!("Storage failure: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(MessageResponse::new(STORAGE_FAILURE)),
    )
}

pub async fn get_api_docs() -> Html<&'static str> {
    Html(
        r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Flatfile Shop API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui.css" />
    <style>
        body {
            margin: 0;
            background: #fafafa;
        }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {
            window.ui = SwaggerUIBundle({
                url: '/docs/openapi.json',
                dom_id: '#swagger-ui',
                deepLinking: true
            });
        };
    </script>
</body>
</html>
"#,
    )
}

pub async fn get_openapi_spec() -> Json<serde_json::Value> {
    let message = serde_json::json!({ "$ref": "#/components/schemas/MessageResponse" });
    let message_response = |description: &str| {
        serde_json::json!({
            "description": description,
            "content": { "application/json": { "schema": message } }
        })
    };
    let id_param = serde_json::json!([{
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "integer" }
    }]);

    Json(serde_json::json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Flatfile Shop API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Product catalog and a single global shopping cart, persisted to JSON files."
        },
        "servers": [{ "url": "/", "description": "Current server" }],
        "tags": [
            { "name": "Products", "description": "Catalog operations" },
            { "name": "Cart", "description": "Cart operations and totals" }
        ],
        "paths": {
            "/health": {
                "get": {
                    "summary": "Health check",
                    "responses": { "200": { "description": "Service is up" } }
                }
            },
            "/products": {
                "get": {
                    "tags": ["Products"],
                    "summary": "List all products",
                    "responses": {
                        "200": {
                            "description": "All products in catalog order",
                            "content": { "application/json": { "schema": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Product" }
                            } } }
                        }
                    }
                },
                "post": {
                    "tags": ["Products"],
                    "summary": "Create a product",
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": {
                            "$ref": "#/components/schemas/CreateProductRequest"
                        } } }
                    },
                    "responses": {
                        "201": { "description": "Product added" },
                        "400": message_response("A required field is missing"),
                        "500": message_response("The catalog could not be written")
                    }
                }
            },
            "/products/{id}": {
                "get": {
                    "tags": ["Products"],
                    "summary": "Get a product by id",
                    "parameters": id_param,
                    "responses": {
                        "200": {
                            "description": "The product",
                            "content": { "application/json": { "schema": {
                                "$ref": "#/components/schemas/Product"
                            } } }
                        },
                        "404": message_response("Product not found")
                    }
                },
                "delete": {
                    "tags": ["Products"],
                    "summary": "Delete a product; cart lines referencing it are kept",
                    "parameters": id_param,
                    "responses": {
                        "200": message_response("Product deleted"),
                        "404": message_response("Product not found"),
                        "500": message_response("The catalog could not be written")
                    }
                }
            },
            "/cart": {
                "get": {
                    "tags": ["Cart"],
                    "summary": "Cart joined with products, with totals",
                    "responses": {
                        "200": {
                            "description": "Cart view",
                            "content": { "application/json": { "schema": {
                                "$ref": "#/components/schemas/CartView"
                            } } }
                        }
                    }
                },
                "post": {
                    "tags": ["Cart"],
                    "summary": "Add a product to the cart, merging quantities",
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": {
                            "$ref": "#/components/schemas/AddCartItemRequest"
                        } } }
                    },
                    "responses": {
                        "201": message_response("Item added"),
                        "400": message_response("A required field is missing"),
                        "404": message_response("Product not found"),
                        "500": message_response("The cart could not be written")
                    }
                }
            },
            "/cart/{id}": {
                "put": {
                    "tags": ["Cart"],
                    "summary": "Replace billing and shipping info of a cart line (id is the product id)",
                    "parameters": id_param,
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": {
                            "$ref": "#/components/schemas/ShippingBillingUpdate"
                        } } }
                    },
                    "responses": {
                        "200": message_response("Info updated"),
                        "404": message_response("Item not found in cart"),
                        "500": message_response("The cart could not be written")
                    }
                },
                "delete": {
                    "tags": ["Cart"],
                    "summary": "Remove a cart line (id is the product id)",
                    "parameters": id_param,
                    "responses": {
                        "200": message_response("Item removed"),
                        "404": message_response("Item not found in cart"),
                        "500": message_response("The cart could not be written")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "MessageResponse": {
                    "type": "object",
                    "properties": { "message": { "type": "string" } }
                },
                "Product": {
                    "type": "object",
                    "required": ["id", "name", "price", "description"],
                    "properties": {
                        "id": { "type": "integer" },
                        "name": { "type": "string" },
                        "price": { "type": "number" },
                        "description": { "type": "string" },
                        "image": { "type": "string" },
                        "title": { "type": "string" }
                    }
                },
                "CreateProductRequest": {
                    "type": "object",
                    "required": ["name", "price", "description"],
                    "properties": {
                        "name": { "type": "string" },
                        "price": { "type": "number" },
                        "description": { "type": "string" }
                    }
                },
                "AddCartItemRequest": {
                    "type": "object",
                    "required": ["productId", "quantity"],
                    "properties": {
                        "productId": { "type": "integer" },
                        "quantity": { "type": "integer" },
                        "billingInfo": { "type": "object" },
                        "shippingInfo": { "type": "object" }
                    }
                },
                "ShippingBillingUpdate": {
                    "type": "object",
                    "properties": {
                        "billingInfo": { "type": "object" },
                        "shippingInfo": { "type": "object" }
                    }
                },
                "CartView": {
                    "type": "object",
                    "properties": {
                        "items": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "id": { "type": "integer" },
                                    "name": { "type": "string" },
                                    "description": { "type": "string" },
                                    "productId": { "type": "integer" },
                                    "quantity": { "type": "integer" },
                                    "image": { "type": "string" },
                                    "title": { "type": "string" },
                                    "price": { "type": "number" },
                                    "totalAmount": { "type": "number" }
                                }
                            }
                        },
                        "totalQuantity": { "type": "integer" },
                        "totalPrice": { "type": "number" }
                    }
                }
            }
        }
    }))
}

// Product handlers
pub async fn list_products<S: Store>(
    State(store): State<AppState<S>>,
) -> Result<Json<Vec<Product>>, (StatusCode, Json<MessageResponse>)> {
    store
        .list_products()
        .await
        .map(Json)
        .map_err(storage_failure)
}

pub async fn get_product<S: Store>(
    State(store): State<AppState<S>>,
    PathId(id): PathId,
) -> Result<Json<Product>, (StatusCode, Json<MessageResponse>)> {
    let Some(id) = id else {
        return Err(not_found(PRODUCT_NOT_FOUND));
    };

    match store.get_product(id).await {
        Ok(Some(product)) => Ok(Json(product)),
        Ok(None) => Err(not_found(PRODUCT_NOT_FOUND)),
        Err(e) => Err(storage_failure(e)),
    }
}

pub async fn create_product<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(request): RequestJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductCreatedResponse>), (StatusCode, Json<MessageResponse>)> {
    let new_product = request.into_new_product().map_err(bad_request)?;

    match store.create_product(new_product).await {
        Ok(product) => Ok((
            StatusCode::CREATED,
            Json(ProductCreatedResponse {
                message: "Product added successfully".to_string(),
                product,
            }),
        )),
        Err(e) => Err(storage_failure(e)),
    }
}

pub async fn delete_product<S: Store>(
    State(store): State<AppState<S>>,
    PathId(id): PathId,
) -> Result<Json<MessageResponse>, (StatusCode, Json<MessageResponse>)> {
    let Some(id) = id else {
        return Err(not_found(PRODUCT_NOT_FOUND));
    };

    match store.delete_product(id).await {
        Ok(true) => Ok(Json(MessageResponse::new("Product deleted successfully"))),
        Ok(false) => Err(not_found(PRODUCT_NOT_FOUND)),
        Err(e) => Err(storage_failure(e)),
    }
}
