//! Query string extractors.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use menuscan_core::LookupOptions;
use menuscan_core::search::RawSearchParams;

use crate::error::ApiError;

/// Raw search parameters. Repeated keys (`category=a&category=b`) are kept.
#[derive(Debug, Clone)]
pub struct SearchParams(pub RawSearchParams);

impl<S> FromRequestParts<S> for SearchParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::InvalidParameter {
                name: "query".to_string(),
                reason: e.body_text(),
            })?;

        Ok(Self(RawSearchParams::from_pairs(pairs)))
    }
}

/// Options of a lookup by id (`include_similar=true`).
#[derive(Debug, Clone, Default)]
pub struct LookupParams(pub LookupOptions);

impl<S> FromRequestParts<S> for LookupParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(options) = Query::<LookupOptions>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::InvalidParameter {
                name: "include_similar".to_string(),
                reason: e.body_text(),
            })?;

        Ok(Self(options))
    }
}
