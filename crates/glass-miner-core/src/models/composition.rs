//! Extraction schema for glass compositions and measured properties.
//!
//! This mirrors the JSON structure the model is instructed to emit: a
//! top-level `compositions` map keyed by the label used in the paper
//! (e.g. "GAST-1"), each entry carrying the formula, elemental/oxide
//! percentages, and measured properties.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Schema violations found while validating a parsed extraction.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("composition `{label}`: component `{component}` has invalid percentage {value}")]
    InvalidPercentage {
        label: String,
        component: String,
        value: f64,
    },

    #[error("composition `{label}`: calculated composition is missing `x`")]
    MissingX { label: String },

    #[error("composition `{label}`: property `{key}` value must be a number or string")]
    BadPropertyValue { label: String, key: String },
}

/// Top-level extraction result for one paper.
///
/// An empty object (`{}`) is the model's contract for "no compositions
/// detected" and deserializes to an empty map.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExtractionOutput {
    /// Compositions keyed by the label used in the paper.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub compositions: BTreeMap<String, Composition>,
}

/// A single glass formulation with its percentages and properties.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Composition {
    /// Whether percentages were computed from a linear combination or
    /// taken verbatim from the paper.
    #[serde(rename = "type")]
    pub kind: CompositionKind,
    /// Percentage basis: "wt%", "atomic", "mol%", etc.
    pub percentage_type: Option<String>,
    /// Formula as written in the paper, e.g. "(1-0.2)·Ge₂₅As₂₅Se₅₀ + 0.2·Te".
    pub formula: String,
    /// Mixing parameter for linear-combination formulas; null for raw notation.
    pub x: Option<f64>,
    /// Component → percentage. Components may be elements or oxides.
    pub composition: BTreeMap<String, f64>,
    /// Measured properties keyed by abbreviation (e.g. "Tg", "Eg").
    #[serde(default)]
    pub properties: BTreeMap<String, Property>,
}

/// How a composition's percentages were obtained.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CompositionKind {
    /// Computed from a linear combination `(1-x)·Base + x·Additive`.
    Calculated,
    /// Percentage-based notation taken directly from the paper.
    Raw,
}

/// A measured property value with unit and measurement method.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    /// Expanded property name, e.g. "Glass Transition Temperature".
    #[serde(alias = "property_full_name")]
    pub full_name: String,
    /// Value exactly as printed in the paper; a number or a string
    /// (ranges like "2.1-2.3" survive as strings).
    pub value: serde_json::Value,
    /// Unit as printed, "-" for dimensionless.
    pub unit: String,
    /// Measurement method, "Not specified" when the paper omits it.
    pub measurement_method: String,
}

impl ExtractionOutput {
    /// Validate structural constraints serde cannot express.
    ///
    /// Returns the first violation found. Percentages must be finite and
    /// non-negative, calculated compositions must carry `x`, and property
    /// values must be numbers or strings.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (label, comp) in &self.compositions {
            for (component, &value) in &comp.composition {
                if !value.is_finite() || value < 0.0 {
                    return Err(ValidationError::InvalidPercentage {
                        label: label.clone(),
                        component: component.clone(),
                        value,
                    });
                }
            }

            if comp.kind == CompositionKind::Calculated && comp.x.is_none() {
                return Err(ValidationError::MissingX {
                    label: label.clone(),
                });
            }

            for (key, property) in &comp.properties {
                if !property.value.is_number() && !property.value.is_string() {
                    return Err(ValidationError::BadPropertyValue {
                        label: label.clone(),
                        key: key.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// True when the model reported no compositions.
    pub fn is_empty(&self) -> bool {
        self.compositions.is_empty()
    }
}
