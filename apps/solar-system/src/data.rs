//! Inbound dataset parsing.
//!
//! The JS side performs the HTTP fetches (NASA near-earth comet elements,
//! per-body descriptive metadata) and forwards the JSON strings here. The
//! dataset publishes every numeric field as a string, so parsing is a real
//! failure surface: records with missing or non-numeric fields are skipped
//! with a warning, never fatal to the session.

use glam::DVec3;
use serde::Deserialize;
use thiserror::Error;

use crate::orbit::{self, OrbitalElements, OrbitError};

/// Only the first N dataset records are visualized.
pub const MAX_COMET_RECORDS: usize = 10;

/// One raw record as served by the dataset. All numerics arrive as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCometRecord {
    /// Short designation ("P/2004 R1 (McNaught)").
    pub object: Option<String>,
    /// Long-form name, present on some records.
    pub object_name: Option<String>,
    pub e: Option<String>,
    pub q_au_1: Option<String>,
    pub i_deg: Option<String>,
    pub w_deg: Option<String>,
    pub node_deg: Option<String>,
}

/// A record the data layer could not turn into a placeable comet.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record is missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` is not numeric: {value:?}")]
    NonNumeric { field: &'static str, value: String },
    #[error(transparent)]
    Orbit(#[from] OrbitError),
    #[error("dataset payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A comet ready to be registered: canonical lowercase name plus its
/// solver-computed display position.
#[derive(Debug, Clone, PartialEq)]
pub struct CometSpec {
    pub name: String,
    pub pos: DVec3,
}

fn numeric_field(value: &Option<String>, field: &'static str) -> Result<f64, RecordError> {
    let raw = value.as_deref().ok_or(RecordError::MissingField(field))?;
    // `"NaN"` and `"inf"` parse as valid f64 but would poison every
    // position computed from them; treat them as non-numeric.
    match raw.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Ok(parsed),
        _ => Err(RecordError::NonNumeric {
            field,
            value: raw.to_string(),
        }),
    }
}

impl RawCometRecord {
    /// Canonical lowercase name for metadata lookups and display.
    pub fn name(&self) -> String {
        self.object
            .as_deref()
            .or(self.object_name.as_deref())
            .unwrap_or("unnamed comet")
            .to_lowercase()
    }

    /// Extract orbital elements, failing on missing/non-numeric fields.
    /// The dataset carries no anomaly; M is fixed at 0.
    pub fn elements(&self) -> Result<OrbitalElements, RecordError> {
        Ok(OrbitalElements {
            e: numeric_field(&self.e, "e")?,
            q: numeric_field(&self.q_au_1, "q_au_1")?,
            i_deg: numeric_field(&self.i_deg, "i_deg")?,
            w_deg: numeric_field(&self.w_deg, "w_deg")?,
            node_deg: numeric_field(&self.node_deg, "node_deg")?,
            m: 0.0,
        })
    }
}

/// Parse a dataset payload into placeable comets.
///
/// Takes the first [`MAX_COMET_RECORDS`] records. Partial-failure tolerant:
/// a record that fails element extraction or the orbit solver is logged and
/// skipped, and the remaining records still go through. Only an unparseable
/// payload is an error, and the caller degrades that to an empty dataset.
pub fn parse_comet_records(json: &str, scale: f64) -> Result<Vec<CometSpec>, RecordError> {
    let records: Vec<RawCometRecord> = serde_json::from_str(json)?;
    let mut comets = Vec::with_capacity(MAX_COMET_RECORDS.min(records.len()));

    for record in records.iter().take(MAX_COMET_RECORDS) {
        let name = record.name();
        let placed = record
            .elements()
            .and_then(|el| orbit::compute_position(&el, scale).map_err(RecordError::from));
        match placed {
            Ok(pos) => comets.push(CometSpec { name, pos }),
            Err(err) => log::warn!("skipping comet record {name:?}: {err}"),
        }
    }

    Ok(comets)
}

// ── Per-body descriptive metadata ────────────────────────────────────

/// Descriptive record fetched per body, keyed by canonical lowercase name.
/// Display only — never used for positioning.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BodyInfo {
    pub name: String,
    #[serde(default)]
    pub overview: Overview,
    #[serde(default)]
    pub radius: String,
    #[serde(default)]
    pub revolution: String,
    #[serde(default)]
    pub rotation: String,
    #[serde(default)]
    pub temperature: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Overview {
    #[serde(default)]
    pub content: String,
}

impl BodyInfo {
    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALLEY: &str = r#"{
        "object": "1P/Halley",
        "e": "0.9671",
        "q_au_1": "0.5860",
        "i_deg": "162.26",
        "w_deg": "111.33",
        "node_deg": "58.42"
    }"#;

    fn wrap(records: &[&str]) -> String {
        format!("[{}]", records.join(","))
    }

    #[test]
    fn parses_valid_record() {
        let comets = parse_comet_records(&wrap(&[HALLEY]), 60.0).unwrap();
        assert_eq!(comets.len(), 1);
        assert_eq!(comets[0].name, "1p/halley");
        // Epoch snapshot sits at perihelion: |pos| = q·scale.
        assert!((comets[0].pos.length() - 0.586 * 60.0).abs() < 1e-6);
    }

    #[test]
    fn skips_malformed_records_and_keeps_the_rest() {
        let missing = r#"{ "object": "X/Lost", "e": "0.5" }"#;
        let non_numeric = r#"{
            "object": "X/Bad",
            "e": "not-a-number",
            "q_au_1": "1.0",
            "i_deg": "0", "w_deg": "0", "node_deg": "0"
        }"#;
        let comets =
            parse_comet_records(&wrap(&[missing, HALLEY, non_numeric]), 60.0).unwrap();
        assert_eq!(comets.len(), 1);
        assert_eq!(comets[0].name, "1p/halley");
    }

    #[test]
    fn skips_non_finite_fields() {
        let nan_q = r#"{
            "object": "X/NanQ",
            "e": "0.5",
            "q_au_1": "NaN",
            "i_deg": "0", "w_deg": "0", "node_deg": "0"
        }"#;
        let inf_q = r#"{
            "object": "X/InfQ",
            "e": "0.5",
            "q_au_1": "inf",
            "i_deg": "0", "w_deg": "0", "node_deg": "0"
        }"#;
        let comets = parse_comet_records(&wrap(&[nan_q, inf_q, HALLEY]), 60.0).unwrap();
        assert_eq!(comets.len(), 1);
        assert_eq!(comets[0].name, "1p/halley");
        assert!(comets[0].pos.is_finite());
    }

    #[test]
    fn skips_hyperbolic_orbit_records() {
        let hyperbolic = r#"{
            "object": "C/Escape",
            "e": "1.2",
            "q_au_1": "0.9",
            "i_deg": "10", "w_deg": "20", "node_deg": "30"
        }"#;
        let comets = parse_comet_records(&wrap(&[hyperbolic, HALLEY]), 60.0).unwrap();
        assert_eq!(comets.len(), 1);
    }

    #[test]
    fn caps_at_max_records() {
        let many: Vec<&str> = std::iter::repeat(HALLEY).take(25).collect();
        let comets = parse_comet_records(&wrap(&many), 60.0).unwrap();
        assert_eq!(comets.len(), MAX_COMET_RECORDS);
    }

    #[test]
    fn invalid_payload_is_an_error() {
        assert!(parse_comet_records("not json", 60.0).is_err());
    }

    #[test]
    fn falls_back_to_long_name() {
        let record = RawCometRecord {
            object: None,
            object_name: Some("Comet Hale-Bopp".into()),
            e: None,
            q_au_1: None,
            i_deg: None,
            w_deg: None,
            node_deg: None,
        };
        assert_eq!(record.name(), "comet hale-bopp");
    }

    #[test]
    fn body_info_parses_nested_overview() {
        let json = r#"{
            "name": "Earth",
            "overview": { "content": "Third planet from the Sun." },
            "radius": "6,371 km",
            "revolution": "365.26 days",
            "rotation": "0.99 days",
            "temperature": "-88 to 58 c"
        }"#;
        let info = BodyInfo::from_json(json).unwrap();
        assert_eq!(info.name, "Earth");
        assert!(info.overview.content.starts_with("Third planet"));
        assert_eq!(info.radius, "6,371 km");
    }

    #[test]
    fn body_info_tolerates_missing_fields() {
        let info = BodyInfo::from_json(r#"{ "name": "pluto" }"#).unwrap();
        assert_eq!(info.name, "pluto");
        assert!(info.overview.content.is_empty());
    }
}
