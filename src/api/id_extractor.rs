use axum::{
    async_trait,
    extract::{rejection::PathRejection, FromRequestParts, Path},
    http::request::Parts,
};

use crate::model::{parse_id_lenient, Id};

/// Axum extractor for the `:id` segment of product and cart routes.
///
/// Ids are parsed leniently (see [`parse_id_lenient`]). A segment that does not
/// start with a number is not rejected; it yields `PathId(None)`, which the
/// handlers answer with their usual 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub Option<Id>);

#[async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = PathRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        Ok(PathId(parse_id_lenient(&raw)))
    }
}
