//! Hierarchy-aware targeting rules for survey runs.

use serde::{Deserialize, Serialize};

use crate::entity_reference::EntityReference;
use crate::error::CoreError;

/// How far a selection expands from its base entity.
///
/// Persisted by variant name in the `selector_hierarchy_scope` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HierarchyQueryScope {
    /// Only the named entity itself.
    Exact,
    /// The named entity and its ancestors.
    Parents,
    /// The named entity and its descendants.
    Children,
}

/// All valid hierarchy scope strings.
const VALID_SCOPE_STRINGS: &[&str] = &["EXACT", "PARENTS", "CHILDREN"];

impl HierarchyQueryScope {
    /// Return the scope as its stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "EXACT",
            Self::Parents => "PARENTS",
            Self::Children => "CHILDREN",
        }
    }

    /// Parse a hierarchy scope from its stored string form.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "EXACT" => Ok(Self::Exact),
            "PARENTS" => Ok(Self::Parents),
            "CHILDREN" => Ok(Self::Children),
            _ => Err(CoreError::Validation(format!(
                "Invalid hierarchy scope '{s}'. Must be one of: {}",
                VALID_SCOPE_STRINGS.join(", ")
            ))),
        }
    }
}

/// A targeting rule: a base entity reference plus the scope to which the
/// selection expands around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionOptions {
    pub entity_reference: EntityReference,
    pub scope: HierarchyQueryScope,
}

impl SelectionOptions {
    /// Build a targeting rule from its two parts.
    pub fn mk_opts(entity_reference: EntityReference, scope: HierarchyQueryScope) -> Self {
        Self {
            entity_reference,
            scope,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::entity_reference::EntityKind;
    use crate::error::CoreError;

    #[test]
    fn every_scope_round_trips_through_its_string_form() {
        for s in VALID_SCOPE_STRINGS {
            let scope = HierarchyQueryScope::from_str(s).unwrap();
            assert_eq!(scope.as_str(), *s);
        }
    }

    #[test]
    fn unknown_scope_is_rejected() {
        let err = HierarchyQueryScope::from_str("SIBLINGS").unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("SIBLINGS"));
    }

    #[test]
    fn mk_opts_wires_reference_and_scope() {
        let opts = SelectionOptions::mk_opts(
            EntityReference::mk_ref(EntityKind::OrgUnit, 7),
            HierarchyQueryScope::Children,
        );
        assert_eq!(opts.entity_reference.id, 7);
        assert_eq!(opts.scope, HierarchyQueryScope::Children);
    }
}
