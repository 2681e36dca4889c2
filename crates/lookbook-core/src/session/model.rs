//! Session domain model.
//!
//! This module contains the core Session entity that represents one user's
//! in-progress wizard selections, together with the selection-field
//! vocabulary and the sparse partial-update payload sent to the remote
//! session service.

use crate::error::{LookbookError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Represents one user's wizard session in the application's domain layer.
///
/// A session carries:
/// - The server-assigned identity (`session_id`, immutable after creation)
/// - The creation timestamp (set once, server-side)
/// - An active flag
/// - One optional selection per wizard step
///
/// Selection fields form a logical progression (product type, color and
/// graphic appearance only mean something once a garment group is chosen),
/// but the model does not enforce ordering; it forwards whatever fields are
/// supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Opaque session identifier, assigned by the remote service at creation
    pub session_id: String,
    /// Timestamp when the session was created
    pub created_at: DateTime<Utc>,
    /// Whether the session is currently active
    pub is_active: bool,
    /// The user's name
    pub name: Option<String>,
    /// Store section (e.g. "Ladies", "Men")
    pub section: Option<String>,
    /// Garment group (e.g. "Blouses", "Skirts")
    pub garment_group: Option<String>,
    /// Product type within the garment group
    pub product_type: Option<String>,
    /// Chosen colour group
    pub color: Option<String>,
    /// Chosen graphical appearance (e.g. "Solid", "Check")
    pub graphic_appearance: Option<String>,
}

impl Session {
    /// Creates a session with the given identity and creation time.
    ///
    /// The session starts inactive with no selections; the remote service is
    /// the normal source of fully-populated sessions via
    /// [`Session::from_transport`].
    pub fn new(session_id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            session_id: session_id.into(),
            created_at,
            is_active: false,
            name: None,
            section: None,
            garment_group: None,
            product_type: None,
            color: None,
            graphic_appearance: None,
        }
    }

    /// Returns true if the session carries a non-empty server-assigned id.
    ///
    /// A session without identity must never be cached or sent for update.
    pub fn has_identity(&self) -> bool {
        !self.session_id.is_empty()
    }

    /// Returns the value of one selection field, if set.
    pub fn selection(&self, field: SelectionField) -> Option<&str> {
        match field {
            SelectionField::Name => self.name.as_deref(),
            SelectionField::Section => self.section.as_deref(),
            SelectionField::GarmentGroup => self.garment_group.as_deref(),
            SelectionField::ProductType => self.product_type.as_deref(),
            SelectionField::Color => self.color.as_deref(),
            SelectionField::GraphicAppearance => self.graphic_appearance.as_deref(),
        }
    }

    /// Sets the value of one selection field.
    pub fn set_selection(&mut self, field: SelectionField, value: impl Into<String>) {
        let value = Some(value.into());
        match field {
            SelectionField::Name => self.name = value,
            SelectionField::Section => self.section = value,
            SelectionField::GarmentGroup => self.garment_group = value,
            SelectionField::ProductType => self.product_type = value,
            SelectionField::Color => self.color = value,
            SelectionField::GraphicAppearance => self.graphic_appearance = value,
        }
    }

    /// Builds a partial-update payload carrying every currently-known
    /// selection field.
    ///
    /// Update calls are cumulative: a later wizard step must resend the
    /// earlier answers so they are never silently erased server-side.
    pub fn selection_patch(&self) -> SessionPatch {
        SessionPatch {
            name: self.name.clone(),
            section: self.section.clone(),
            garment_group: self.garment_group.clone(),
            product_type: self.product_type.clone(),
            color: self.color.clone(),
            graphic_appearance: self.graphic_appearance.clone(),
        }
    }
}

/// One wizard-step answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionField {
    Name,
    Section,
    GarmentGroup,
    ProductType,
    Color,
    GraphicAppearance,
}

impl SelectionField {
    /// All selection fields in wizard-step order.
    pub const ALL: [SelectionField; 6] = [
        SelectionField::Name,
        SelectionField::Section,
        SelectionField::GarmentGroup,
        SelectionField::ProductType,
        SelectionField::Color,
        SelectionField::GraphicAppearance,
    ];

    /// The wire/storage name of this field.
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionField::Name => "name",
            SelectionField::Section => "section",
            SelectionField::GarmentGroup => "garment_group",
            SelectionField::ProductType => "product_type",
            SelectionField::Color => "color",
            SelectionField::GraphicAppearance => "graphic_appearance",
        }
    }
}

impl fmt::Display for SelectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionField {
    type Err = LookbookError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" => Ok(SelectionField::Name),
            "section" => Ok(SelectionField::Section),
            "garment_group" => Ok(SelectionField::GarmentGroup),
            "product_type" => Ok(SelectionField::ProductType),
            "color" => Ok(SelectionField::Color),
            "graphic_appearance" => Ok(SelectionField::GraphicAppearance),
            other => Err(LookbookError::internal(format!(
                "Unknown selection field: '{}'",
                other
            ))),
        }
    }
}

/// Sparse partial-update payload for `PUT /session/{id}`.
///
/// Absent keys are skipped during serialization and left untouched
/// server-side; the gateway owns the merge semantics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub garment_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graphic_appearance: Option<String>,
}

impl SessionPatch {
    /// Sets the value for one field of the patch.
    pub fn set(&mut self, field: SelectionField, value: impl Into<String>) {
        let value = Some(value.into());
        match field {
            SelectionField::Name => self.name = value,
            SelectionField::Section => self.section = value,
            SelectionField::GarmentGroup => self.garment_group = value,
            SelectionField::ProductType => self.product_type = value,
            SelectionField::Color => self.color = value,
            SelectionField::GraphicAppearance => self.graphic_appearance = value,
        }
    }

    /// Builder-style variant of [`SessionPatch::set`].
    pub fn with(mut self, field: SelectionField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Returns the value carried for one field, if any.
    pub fn get(&self, field: SelectionField) -> Option<&str> {
        match field {
            SelectionField::Name => self.name.as_deref(),
            SelectionField::Section => self.section.as_deref(),
            SelectionField::GarmentGroup => self.garment_group.as_deref(),
            SelectionField::ProductType => self.product_type.as_deref(),
            SelectionField::Color => self.color.as_deref(),
            SelectionField::GraphicAppearance => self.graphic_appearance.as_deref(),
        }
    }

    /// Returns true if no field is carried.
    pub fn is_empty(&self) -> bool {
        SelectionField::ALL.iter().all(|f| self.get(*f).is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        let mut s = Session::new("abc123", Utc::now());
        s.set_selection(SelectionField::Name, "Alex");
        s.set_selection(SelectionField::GarmentGroup, "Blouses");
        s
    }

    #[test]
    fn test_selection_patch_carries_known_fields() {
        let patch = session().selection_patch();
        assert_eq!(patch.get(SelectionField::Name), Some("Alex"));
        assert_eq!(patch.get(SelectionField::GarmentGroup), Some("Blouses"));
        assert_eq!(patch.get(SelectionField::Color), None);
    }

    #[test]
    fn test_patch_serialization_skips_absent_fields() {
        let patch = session()
            .selection_patch()
            .with(SelectionField::Color, "Black");
        let value = serde_json::to_value(&patch).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map["name"], "Alex");
        assert_eq!(map["garment_group"], "Blouses");
        assert_eq!(map["color"], "Black");
        assert!(!map.contains_key("product_type"));
    }

    #[test]
    fn test_patch_set_overrides() {
        let patch = session()
            .selection_patch()
            .with(SelectionField::Name, "Sam");
        assert_eq!(patch.get(SelectionField::Name), Some("Sam"));
    }

    #[test]
    fn test_empty_patch() {
        assert!(SessionPatch::default().is_empty());
        assert!(!session().selection_patch().is_empty());
    }

    #[test]
    fn test_has_identity() {
        assert!(session().has_identity());
        assert!(!Session::new("", Utc::now()).has_identity());
    }

    #[test]
    fn test_selection_field_roundtrip() {
        for field in SelectionField::ALL {
            assert_eq!(field.as_str().parse::<SelectionField>().unwrap(), field);
        }
        assert!("sleeve_length".parse::<SelectionField>().is_err());
    }
}
