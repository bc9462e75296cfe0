pub mod cart;
pub mod common;
pub mod product;

pub use cart::*;
pub use common::*;
pub use product::*;
