//! Survey-run lifecycle enums and the involvement-kind id list codec.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Lifecycle enums
// ---------------------------------------------------------------------------

/// Lifecycle state of a survey run.
///
/// Persisted by variant name in the `status` column. The gateway only ever
/// writes `DRAFT` (on create) and `ISSUED` (on issue); `COMPLETED` is set
/// by the surrounding application and must still round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SurveyRunStatus {
    Draft,
    Issued,
    Completed,
}

/// All valid survey run status strings.
const VALID_STATUS_STRINGS: &[&str] = &["DRAFT", "ISSUED", "COMPLETED"];

impl SurveyRunStatus {
    /// Return the status as its stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Issued => "ISSUED",
            Self::Completed => "COMPLETED",
        }
    }

    /// Parse a status from its stored string form.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "DRAFT" => Ok(Self::Draft),
            "ISSUED" => Ok(Self::Issued),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(CoreError::Validation(format!(
                "Invalid survey run status '{s}'. Must be one of: {}",
                VALID_STATUS_STRINGS.join(", ")
            ))),
        }
    }
}

/// Mechanism by which a survey run reaches its recipients.
///
/// Persisted by variant name in the `issuance_kind` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SurveyIssuanceKind {
    /// Each recipient gets their own survey instance.
    Individual,
    /// Recipients share one group instance.
    Group,
}

/// All valid issuance kind strings.
const VALID_ISSUANCE_KIND_STRINGS: &[&str] = &["INDIVIDUAL", "GROUP"];

impl SurveyIssuanceKind {
    /// Return the issuance kind as its stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "INDIVIDUAL",
            Self::Group => "GROUP",
        }
    }

    /// Parse an issuance kind from its stored string form.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "INDIVIDUAL" => Ok(Self::Individual),
            "GROUP" => Ok(Self::Group),
            _ => Err(CoreError::Validation(format!(
                "Invalid issuance kind '{s}'. Must be one of: {}",
                VALID_ISSUANCE_KIND_STRINGS.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Involvement-kind id list codec
// ---------------------------------------------------------------------------

/// Separator for the `involvement_kind_ids` column. Decimal ids never
/// contain it, so the encoding is lossless.
pub const ID_SEPARATOR: &str = ";";

/// Join involvement-kind ids into their stored string form.
///
/// An empty list encodes as the empty string.
pub fn encode_involvement_kind_ids(ids: &[DbId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(ID_SEPARATOR)
}

/// Split a stored involvement-kind id string back into ids, preserving
/// order. The empty string decodes as the empty list.
pub fn parse_involvement_kind_ids(raw: &str) -> Result<Vec<DbId>, CoreError> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    raw.split(ID_SEPARATOR)
        .map(|part| {
            part.parse::<DbId>().map_err(|_| {
                CoreError::Validation(format!(
                    "Invalid involvement kind id '{part}' in encoded list '{raw}'"
                ))
            })
        })
        .collect()
}
