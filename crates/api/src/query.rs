//! Shared query parameter types for API handlers.

use matzip_core::types::DbId;
use serde::Deserialize;

/// `?cuisine_type_id=` filter for the category listing.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryListParams {
    pub cuisine_type_id: Option<DbId>,
}
