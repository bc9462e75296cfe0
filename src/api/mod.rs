pub mod cart_handlers;
pub mod handlers;
pub mod id_extractor;
pub mod routes;

pub use cart_handlers::*;
pub use handlers::*;
pub use id_extractor::*;
pub use routes::*;
