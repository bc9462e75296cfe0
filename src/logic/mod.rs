pub mod cart;
pub mod catalog;
pub mod totals;

pub use cart::*;
pub use catalog::*;
pub use totals::*;
