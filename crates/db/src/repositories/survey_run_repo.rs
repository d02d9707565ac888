//! Repository for the `survey_runs` table.

use chrono::Utc;
use sqlx::PgPool;

use canvass_core::survey::{encode_involvement_kind_ids, SurveyRunStatus};
use canvass_core::types::DbId;

use crate::models::survey_run::{SurveyRun, SurveyRunChangeCommand, SurveyRunCreateCommand};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, survey_template_id, name, description, \
     selector_entity_kind, selector_entity_id, selector_hierarchy_scope, \
     involvement_kind_ids, issued_on, due_date, issuance_kind, owner_id, \
     contact_email, status, created_at, updated_at";

/// Sole point of translation between the survey-run domain model and its
/// persisted row.
pub struct SurveyRunRepo;

impl SurveyRunRepo {
    /// Fetch a survey run by its internal ID.
    pub async fn get_by_id(pool: &PgPool, id: DbId) -> Result<Option<SurveyRun>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM survey_runs WHERE id = $1");
        sqlx::query_as::<_, SurveyRun>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List survey runs owned by a user, newest first.
    pub async fn find_for_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<SurveyRun>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM survey_runs \
             WHERE owner_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, SurveyRun>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a new survey run owned by `owner_id`, returning the
    /// generated ID.
    ///
    /// The run always starts in `DRAFT` status with no issuance date,
    /// whatever the command carries.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        command: &SurveyRunCreateCommand,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO survey_runs (survey_template_id, name, description, \
                 selector_entity_kind, selector_entity_id, selector_hierarchy_scope, \
                 involvement_kind_ids, due_date, issuance_kind, owner_id, \
                 contact_email, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING id",
        )
        .bind(command.survey_template_id)
        .bind(&command.name)
        .bind(&command.description)
        .bind(command.selection_options.entity_reference.kind.as_str())
        .bind(command.selection_options.entity_reference.id)
        .bind(command.selection_options.scope.as_str())
        .bind(encode_involvement_kind_ids(&command.involvement_kind_ids))
        .bind(command.due_date)
        .bind(command.issuance_kind.as_str())
        .bind(owner_id)
        .bind(&command.contact_email)
        .bind(SurveyRunStatus::Draft.as_str())
        .fetch_one(pool)
        .await
    }

    /// Overwrite the mutable fields of a survey run.
    ///
    /// Status, issuance date, template and owner are left untouched.
    /// Returns the number of rows updated; 0 means no run has that ID.
    pub async fn update(
        pool: &PgPool,
        survey_run_id: DbId,
        command: &SurveyRunChangeCommand,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE survey_runs SET \
                 name = $2, description = $3, selector_entity_kind = $4, \
                 selector_entity_id = $5, selector_hierarchy_scope = $6, \
                 involvement_kind_ids = $7, due_date = $8, issuance_kind = $9, \
                 contact_email = $10 \
             WHERE id = $1",
        )
        .bind(survey_run_id)
        .bind(&command.name)
        .bind(&command.description)
        .bind(command.selection_options.entity_reference.kind.as_str())
        .bind(command.selection_options.entity_reference.id)
        .bind(command.selection_options.scope.as_str())
        .bind(encode_involvement_kind_ids(&command.involvement_kind_ids))
        .bind(command.due_date)
        .bind(command.issuance_kind.as_str())
        .bind(&command.contact_email)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Overwrite the status column, whatever the current status is.
    ///
    /// Transition validity is the caller's concern. Setting `ISSUED`
    /// through here skips the `issued_on` stamp;
    /// [`SurveyRunRepo::issue`] is the blessed path to `ISSUED`.
    pub async fn update_status(
        pool: &PgPool,
        survey_run_id: DbId,
        new_status: SurveyRunStatus,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE survey_runs SET status = $2 WHERE id = $1")
            .bind(survey_run_id)
            .bind(new_status.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Move a survey run to `ISSUED` and stamp `issued_on` with the
    /// current UTC calendar date.
    ///
    /// The only writer of `issued_on`; issuing again re-stamps the date.
    pub async fn issue(pool: &PgPool, survey_run_id: DbId) -> Result<u64, sqlx::Error> {
        let issued_on = Utc::now().date_naive();
        let result =
            sqlx::query("UPDATE survey_runs SET status = $2, issued_on = $3 WHERE id = $1")
                .bind(survey_run_id)
                .bind(SurveyRunStatus::Issued.as_str())
                .bind(issued_on)
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }
}
