//! Entity kinds and typed references to entities.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Kinds of entity a survey run can target.
///
/// Persisted by variant name in the `selector_entity_kind` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    Application,
    AppGroup,
    ChangeInitiative,
    Measurable,
    OrgUnit,
    Person,
}

/// All valid entity kind strings.
const VALID_ENTITY_KIND_STRINGS: &[&str] = &[
    "APPLICATION",
    "APP_GROUP",
    "CHANGE_INITIATIVE",
    "MEASURABLE",
    "ORG_UNIT",
    "PERSON",
];

impl EntityKind {
    /// Return the kind as its stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Application => "APPLICATION",
            Self::AppGroup => "APP_GROUP",
            Self::ChangeInitiative => "CHANGE_INITIATIVE",
            Self::Measurable => "MEASURABLE",
            Self::OrgUnit => "ORG_UNIT",
            Self::Person => "PERSON",
        }
    }

    /// Parse an entity kind from its stored string form.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "APPLICATION" => Ok(Self::Application),
            "APP_GROUP" => Ok(Self::AppGroup),
            "CHANGE_INITIATIVE" => Ok(Self::ChangeInitiative),
            "MEASURABLE" => Ok(Self::Measurable),
            "ORG_UNIT" => Ok(Self::OrgUnit),
            "PERSON" => Ok(Self::Person),
            _ => Err(CoreError::Validation(format!(
                "Invalid entity kind '{s}'. Must be one of: {}",
                VALID_ENTITY_KIND_STRINGS.join(", ")
            ))),
        }
    }
}

/// A typed reference to a single entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityReference {
    pub kind: EntityKind,
    pub id: DbId,
}

impl EntityReference {
    /// Build a reference to the entity of `kind` with the given id.
    pub fn mk_ref(kind: EntityKind, id: DbId) -> Self {
        Self { kind, id }
    }
}
