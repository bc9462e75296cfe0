use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::api::{cart_handlers, handlers};
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>() -> Router<Arc<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // API Documentation
        .route("/docs", get(handlers::get_api_docs))
        .route("/docs/openapi.json", get(handlers::get_openapi_spec))
        // Catalog
        .route(
            "/products",
            get(handlers::list_products::<S>).post(handlers::create_product::<S>),
        )
        .route(
            "/products/:id",
            get(handlers::get_product::<S>).delete(handlers::delete_product::<S>),
        )
        // Cart
        .route(
            "/cart",
            get(cart_handlers::view_cart::<S>).post(cart_handlers::add_to_cart::<S>),
        )
        .route(
            "/cart/:id",
            put(cart_handlers::update_cart_item::<S>).delete(cart_handlers::remove_cart_item::<S>),
        )
}

/// Browsers may call the API from any origin
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Router with state and middleware applied, ready to serve
pub fn build_app<S: Store + 'static>(store: Arc<S>) -> Router {
    create_router()
        .with_state(store)
        .layer(ServiceBuilder::new().layer(cors_layer()))
}
