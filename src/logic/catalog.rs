use crate::model::{Id, IdAssignment, Product};

/// First product with the given id. Linear scan; the catalog keeps no index.
pub fn find_product(products: &[Product], id: Id) -> Option<&Product> {
    products.iter().find(|product| product.id == id)
}

pub fn position_of_product(products: &[Product], id: Id) -> Option<usize> {
    products.iter().position(|product| product.id == id)
}

/// `None` once the id space is used up, e.g. a hand-edited catalog holding `i64::MAX`
pub fn next_product_id(products: &[Product], assignment: IdAssignment) -> Option<Id> {
    match assignment {
        IdAssignment::Sequential => Id::try_from(products.len()).ok()?.checked_add(1),
        IdAssignment::NextAfterMax => products
            .iter()
            .map(|p| p.id)
            .max()
            .unwrap_or(0)
            .checked_add(1),
    }
}
