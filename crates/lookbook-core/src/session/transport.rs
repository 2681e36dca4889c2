//! Session transport mapping.
//!
//! The remote session service and the local cache both exchange sessions as
//! loosely-typed JSON records. This module is the single place where that
//! record shape is interpreted: [`Session::from_transport`] constructs a
//! session from such a payload, [`Session::to_transport`] produces one.
//!
//! The upstream service emits `created_at` as a naive local timestamp and
//! unset selection fields as empty strings; both conventions are normalized
//! on ingest and reproduced on egress, so the two functions are exact
//! inverses for every field this layer controls.

use crate::error::{LookbookError, Result};
use crate::session::model::Session;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value, json};

impl Session {
    /// Constructs a session from a loosely-typed transport payload.
    ///
    /// `created_at` is coerced from an RFC 3339 string, a naive
    /// `YYYY-MM-DDTHH:MM:SS[.f]` string, or an epoch seconds/milliseconds
    /// number. Selection fields that are missing, null, or empty strings are
    /// treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`LookbookError::MalformedSession`] if the payload is not an
    /// object, or if `session_id` or `created_at` is absent or malformed.
    pub fn from_transport(data: &Value) -> Result<Self> {
        let map = data
            .as_object()
            .ok_or_else(|| LookbookError::malformed_session("payload is not an object"))?;

        let session_id = map
            .get("session_id")
            .and_then(Value::as_str)
            .ok_or_else(|| LookbookError::malformed_session("missing session_id"))?
            .to_string();

        let created_at = map
            .get("created_at")
            .ok_or_else(|| LookbookError::malformed_session("missing created_at"))
            .and_then(parse_timestamp)?;

        Ok(Self {
            session_id,
            created_at,
            is_active: map.get("is_active").and_then(Value::as_bool).unwrap_or(false),
            name: selection(map, "name"),
            section: selection(map, "section"),
            garment_group: selection(map, "garment_group"),
            product_type: selection(map, "product_type"),
            color: selection(map, "color"),
            graphic_appearance: selection(map, "graphic_appearance"),
        })
    }

    /// Produces the plain transport mapping for this session.
    ///
    /// Every attribute is present; `created_at` is rendered as RFC 3339 and
    /// unset selection fields as empty strings, matching the upstream record
    /// shape.
    pub fn to_transport(&self) -> Value {
        json!({
            "session_id": self.session_id,
            "created_at": self.created_at.to_rfc3339(),
            "is_active": self.is_active,
            "name": self.name.clone().unwrap_or_default(),
            "section": self.section.clone().unwrap_or_default(),
            "garment_group": self.garment_group.clone().unwrap_or_default(),
            "product_type": self.product_type.clone().unwrap_or_default(),
            "color": self.color.clone().unwrap_or_default(),
            "graphic_appearance": self.graphic_appearance.clone().unwrap_or_default(),
        })
    }
}

/// Reads one selection field, normalizing null/missing/empty to `None`.
fn selection(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Coerces a date-like transport value into a UTC timestamp.
fn parse_timestamp(value: &Value) -> Result<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Ok(dt.with_timezone(&Utc));
            }
            // Naive timestamps, as emitted by the upstream service
            for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
                if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                    return Ok(naive.and_utc());
                }
            }
            Err(LookbookError::malformed_session(format!(
                "unparseable created_at: '{}'",
                s
            )))
        }
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                // Values past ~2286 in seconds are taken as milliseconds
                let parsed = if i.abs() >= 10_000_000_000 {
                    DateTime::from_timestamp_millis(i)
                } else {
                    DateTime::from_timestamp(i, 0)
                };
                return parsed.ok_or_else(|| {
                    LookbookError::malformed_session(format!("created_at out of range: {}", i))
                });
            }
            n.as_f64()
                .and_then(|f| DateTime::from_timestamp_millis((f * 1000.0) as i64))
                .ok_or_else(|| {
                    LookbookError::malformed_session(format!("created_at out of range: {}", n))
                })
        }
        other => Err(LookbookError::malformed_session(format!(
            "created_at has unsupported type: {}",
            other
        ))),
    }
}
