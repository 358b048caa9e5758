//! Storage entity - One row per persisted application slice.
//! The value column holds the slice encoded as JSON text.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Slice storage database model - key/value rows
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "app_storage")]
pub struct Model {
    /// Slice key (e.g., `"keto_settings"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// JSON-encoded slice value
    pub value: String,
    /// When this slice was last written
    pub updated_at: DateTime,
}

/// Slices never reference each other
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
