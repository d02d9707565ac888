//! Survey run entity model and command DTOs.
//!
//! The `survey_runs` table stores two denormalized encodings that this
//! module owns end to end, next to the column names they map to:
//!
//! - the targeting rule is flattened into `selector_entity_kind`,
//!   `selector_entity_id` and `selector_hierarchy_scope`, and reassembled
//!   into a [`SelectionOptions`] on read;
//! - `involvement_kind_ids` holds a `;`-joined list of decimal ids.
//!
//! A stored value the codecs do not recognize is corrupt data and fails
//! the row decode; nothing here falls back to a default.

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

use canvass_core::entity_reference::{EntityKind, EntityReference};
use canvass_core::error::CoreError;
use canvass_core::selection::{HierarchyQueryScope, SelectionOptions};
use canvass_core::survey::{parse_involvement_kind_ids, SurveyIssuanceKind, SurveyRunStatus};
use canvass_core::types::{CalendarDate, DbId, Timestamp};

/// A row from the `survey_runs` table, with the denormalized columns
/// decoded into their domain shapes.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyRun {
    pub id: DbId,
    pub survey_template_id: DbId,
    pub name: String,
    pub description: String,
    pub selection_options: SelectionOptions,
    pub involvement_kind_ids: Vec<DbId>,
    /// Set only once the run has been issued.
    pub issued_on: Option<CalendarDate>,
    pub due_date: Option<CalendarDate>,
    pub issuance_kind: SurveyIssuanceKind,
    pub owner_id: DbId,
    pub contact_email: Option<String>,
    pub status: SurveyRunStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Surface a codec failure as a decode error on the column it came from.
fn decode_err(column: &str, source: CoreError) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}

impl<'r> FromRow<'r, PgRow> for SurveyRun {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let kind = EntityKind::from_str(&row.try_get::<String, _>("selector_entity_kind")?)
            .map_err(|e| decode_err("selector_entity_kind", e))?;
        let scope =
            HierarchyQueryScope::from_str(&row.try_get::<String, _>("selector_hierarchy_scope")?)
                .map_err(|e| decode_err("selector_hierarchy_scope", e))?;
        let selection_options = SelectionOptions::mk_opts(
            EntityReference::mk_ref(kind, row.try_get("selector_entity_id")?),
            scope,
        );

        let involvement_kind_ids =
            parse_involvement_kind_ids(&row.try_get::<String, _>("involvement_kind_ids")?)
                .map_err(|e| decode_err("involvement_kind_ids", e))?;

        let issuance_kind = SurveyIssuanceKind::from_str(&row.try_get::<String, _>("issuance_kind")?)
            .map_err(|e| decode_err("issuance_kind", e))?;
        let status = SurveyRunStatus::from_str(&row.try_get::<String, _>("status")?)
            .map_err(|e| decode_err("status", e))?;

        Ok(Self {
            id: row.try_get("id")?,
            survey_template_id: row.try_get("survey_template_id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            selection_options,
            involvement_kind_ids,
            issued_on: row.try_get("issued_on")?,
            due_date: row.try_get("due_date")?,
            issuance_kind,
            owner_id: row.try_get("owner_id")?,
            contact_email: row.try_get("contact_email")?,
            status,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Command to create a new survey run.
///
/// The owner is supplied separately by the caller and the status is
/// forced to `DRAFT`; neither is part of the command.
#[derive(Debug, Clone, Deserialize)]
pub struct SurveyRunCreateCommand {
    pub survey_template_id: DbId,
    pub name: String,
    pub description: String,
    pub selection_options: SelectionOptions,
    pub involvement_kind_ids: Vec<DbId>,
    pub due_date: Option<CalendarDate>,
    pub issuance_kind: SurveyIssuanceKind,
    pub contact_email: Option<String>,
}

/// Command to overwrite the mutable fields of an existing survey run.
///
/// Carries no template, owner, status or issuance date: update never
/// touches those columns.
#[derive(Debug, Clone, Deserialize)]
pub struct SurveyRunChangeCommand {
    pub name: String,
    pub description: String,
    pub selection_options: SelectionOptions,
    pub involvement_kind_ids: Vec<DbId>,
    pub due_date: Option<CalendarDate>,
    pub issuance_kind: SurveyIssuanceKind,
    pub contact_email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_command_deserializes_from_api_payload() {
        let command: SurveyRunCreateCommand = serde_json::from_value(serde_json::json!({
            "survey_template_id": 1,
            "name": "Q1 Survey",
            "description": "",
            "selection_options": {
                "entity_reference": { "kind": "APPLICATION", "id": 42 },
                "scope": "CHILDREN"
            },
            "involvement_kind_ids": [1, 2],
            "due_date": "2024-03-01",
            "issuance_kind": "GROUP",
            "contact_email": null
        }))
        .unwrap();

        assert_eq!(command.survey_template_id, 1);
        assert_eq!(
            command.selection_options.entity_reference.kind,
            EntityKind::Application
        );
        assert_eq!(command.selection_options.scope, HierarchyQueryScope::Children);
        assert_eq!(command.involvement_kind_ids, vec![1, 2]);
        assert_eq!(
            command.due_date,
            chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(command.issuance_kind, SurveyIssuanceKind::Group);
        assert_eq!(command.contact_email, None);
    }
}
