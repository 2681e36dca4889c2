//! Catalog domain models.
//!
//! Plain value objects for article metadata and scored recommendations, as
//! served by the catalog endpoints. No behavior; pure data records.

use serde::{Deserialize, Serialize};

/// Metadata for one catalog article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Article identifier
    pub article_id: i64,
    /// Product display name
    pub prod_name: String,
    /// Product type (e.g. "Shirt", "Skirt")
    pub prod_type_name: String,
    /// Product group (e.g. "Garment Upper body")
    pub prod_group_name: String,
    /// Graphical appearance (e.g. "Solid", "Check")
    pub graphical_appearance_name: String,
    /// Colour group
    pub colour_group_name: String,
    /// Perceived colour value (e.g. "Dark")
    pub perceived_colour_value_name: String,
    /// Perceived master colour
    pub perceived_colour_master_name: String,
    /// Index group (store department)
    pub index_group_name: String,
    /// Garment group
    pub garment_group_name: String,
    /// Free-text product description
    pub detail_desc: String,
    /// Predicted sleeve type
    pub sleeve_prediction: String,
    /// Predicted garment length
    pub length_prediction: String,
    /// Predicted neckline
    pub neckline_prediction: String,
    /// Fabrics detected in the description
    pub detected_fabrics: String,
}

/// One entry of the recommendation board: an article plus its compatibility
/// scoring against the session's query item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedItem {
    /// The recommended article's metadata
    #[serde(flatten)]
    pub item: Item,
    /// Overall compatibility with the query item
    #[serde(default)]
    pub compatibility_score: f64,
    /// Per-feature importance scores
    #[serde(default)]
    pub color_importance: f64,
    #[serde(default)]
    pub luminance_importance: f64,
    #[serde(default)]
    pub appearance_importance: f64,
    #[serde(default)]
    pub fabric_importance: f64,
    #[serde(default)]
    pub neckline_importance: f64,
    #[serde(default)]
    pub sleeve_importance: f64,
    #[serde(default)]
    pub length_importance: f64,
}
