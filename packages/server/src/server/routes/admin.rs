//! Admin routes: page bootstrap, the form-dispatch action boundary, and the
//! provider edit views. All of these sit behind the session middleware.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Form;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{error, warn};

use crate::common::IntakeError;
use crate::domains::psychiatrists::actions::{
    create_psychiatrist, get_psychiatrist_details, list_psychiatrists, list_summaries,
    remove_psychiatrist, update_psychiatrist, UpsertPsychiatrist,
};
use crate::domains::psychiatrists::data::{
    PsychiatristData, PsychiatristDetail, PsychiatristSummary,
};
use crate::domains::psychiatrists::models::psychiatrist::{
    AssociationSets, PsychiatristAttributes,
};
use crate::domains::taxonomy::actions::{add_entity, remove_entity, rename_entity};
use crate::domains::taxonomy::models::entity::EntityOptions;
use crate::server::app::AppState;
use crate::server::routes::search::optional_id;

/// Error payload for read endpoints.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&IntakeError> for ErrorResponse {
    fn from(err: &IntakeError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// Outcome of an admin form submission.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

/// Admin page bootstrap: every psychiatrist plus all five reference lists.
#[derive(Debug, Serialize)]
pub struct AdminPageData {
    pub psychiatrists: Vec<PsychiatristData>,
    #[serde(flatten)]
    pub entities: EntityOptions,
}

/// One form shape for every admin submission; which operation runs is keyed
/// by which fields are present. Scalar fields arrive as raw strings because
/// the browser posts empty values for untouched inputs; checkboxes count as
/// presence.
#[derive(Debug, Deserialize)]
pub struct AdminForm {
    // Entity management
    pub new_entity_name: Option<String>,
    pub entity_type: Option<String>,
    pub rename_entity_id: Option<String>,
    pub delete_entity_id: Option<String>,

    // Psychiatrist management
    pub delete_psychiatrist_id: Option<String>,
    pub psychiatrist_id: Option<String>,
    pub is_adding_new: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub credentials: Option<String>,
    pub notes: Option<String>,
    pub initial_appt_length: Option<String>,
    pub follow_up_appt_length: Option<String>,
    pub num_patients_accepted: Option<String>,
    pub requires_in_person_first_meeting: Option<String>,
    #[serde(default)]
    pub insurances: Vec<i32>,
    #[serde(default)]
    pub locations: Vec<i32>,
    #[serde(default)]
    pub age_groups: Vec<i32>,
    #[serde(default)]
    pub conditions: Vec<i32>,
    #[serde(default)]
    pub medications: Vec<i32>,
}

fn required_id(value: &Option<String>, field: &str) -> Result<i32, IntakeError> {
    optional_id(value, field)?
        .ok_or_else(|| IntakeError::Validation(format!("Missing {}", field)))
}

fn required_num(value: &Option<String>, field: &str) -> Result<i32, IntakeError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Err(IntakeError::Validation(format!("Missing {}", field))),
        Some(raw) => raw
            .parse()
            .map_err(|_| IntakeError::Validation(format!("Invalid {}: {}", field, raw))),
    }
}

/// GET /admin - page bootstrap data.
pub async fn admin_page_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<AdminPageData>, (StatusCode, Json<ErrorResponse>)> {
    let result = async {
        let psychiatrists = list_psychiatrists(&state.db_pool).await?;
        let entities = crate::domains::taxonomy::actions::list_options(&state.db_pool).await?;
        Ok::<_, IntakeError>(AdminPageData {
            psychiatrists,
            entities,
        })
    }
    .await;

    result.map(Json).map_err(|err| {
        error!(error = %err, "Failed to load admin page data");
        (err.status(), Json(ErrorResponse::from(&err)))
    })
}

/// GET /admin/psychiatrists - name-only rows for the edit list.
pub async fn psychiatrist_list_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<PsychiatristSummary>>, (StatusCode, Json<ErrorResponse>)> {
    list_summaries(&state.db_pool).await.map(Json).map_err(|err| {
        error!(error = %err, "Failed to list psychiatrists");
        (err.status(), Json(ErrorResponse::from(&err)))
    })
}

/// GET /admin/psychiatrists/:id - detail view with associations resolved to
/// named entities.
pub async fn psychiatrist_detail_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PsychiatristDetail>, (StatusCode, Json<ErrorResponse>)> {
    get_psychiatrist_details(id, &state.db_pool)
        .await
        .map(Json)
        .map_err(|err| {
            warn!(id, error = %err, "Psychiatrist detail lookup failed");
            (err.status(), Json(ErrorResponse::from(&err)))
        })
}

/// POST /admin - dispatch a form submission to the matching operation.
///
/// Every fault is caught here and converted into a structured
/// `{success, message}` response; nothing propagates raw.
pub async fn admin_action_handler(
    Extension(state): Extension<AppState>,
    Form(form): Form<AdminForm>,
) -> (StatusCode, Json<ActionResponse>) {
    match dispatch(form, &state.db_pool).await {
        Ok(message) => (
            StatusCode::OK,
            Json(ActionResponse {
                success: true,
                message,
            }),
        ),
        Err(err) => {
            warn!(error = %err, "Admin action failed");
            (
                err.status(),
                Json(ActionResponse {
                    success: false,
                    message: err.to_string(),
                }),
            )
        }
    }
}

async fn dispatch(form: AdminForm, pool: &PgPool) -> Result<String, IntakeError> {
    // Entity rename (carries the create fields plus the target id)
    if form.rename_entity_id.is_some() && form.entity_type.is_some() {
        let id = required_id(&form.rename_entity_id, "entity id")?;
        let kind = form.entity_type.as_deref().unwrap_or_default();
        let name = form.new_entity_name.as_deref().unwrap_or_default();
        rename_entity(kind, id, name, pool).await?;
        return Ok("Entity renamed successfully.".to_string());
    }

    // Entity creation
    if let (Some(name), Some(kind)) = (&form.new_entity_name, &form.entity_type) {
        add_entity(kind, name, pool).await?;
        return Ok("Entity added successfully.".to_string());
    }

    // Entity deletion
    if form.delete_entity_id.is_some() && form.entity_type.is_some() {
        let id = required_id(&form.delete_entity_id, "entity id")?;
        let kind = form.entity_type.as_deref().unwrap_or_default();
        remove_entity(kind, id, pool).await?;
        return Ok("Entity deleted successfully.".to_string());
    }

    // Psychiatrist deletion
    if form.delete_psychiatrist_id.is_some() {
        let id = required_id(&form.delete_psychiatrist_id, "psychiatrist id")?;
        remove_psychiatrist(id, pool).await?;
        return Ok("Psychiatrist deleted successfully.".to_string());
    }

    // Psychiatrist creation or update
    if form.first_name.is_some() || form.last_name.is_some() || form.psychiatrist_id.is_some() {
        let is_adding_new = form.is_adding_new.as_deref() == Some("true");
        let input = upsert_input(&form)?;

        if is_adding_new {
            create_psychiatrist(&input, pool).await?;
            return Ok("Psychiatrist created successfully.".to_string());
        }

        let id = required_id(&form.psychiatrist_id, "psychiatrist id")?;
        update_psychiatrist(id, &input, pool).await?;
        return Ok("Psychiatrist updated successfully.".to_string());
    }

    Err(IntakeError::Validation("Invalid action.".to_string()))
}

fn upsert_input(form: &AdminForm) -> Result<UpsertPsychiatrist, IntakeError> {
    let attributes = PsychiatristAttributes {
        first_name: form.first_name.clone().unwrap_or_default(),
        last_name: form.last_name.clone().unwrap_or_default(),
        credentials: form.credentials.clone().unwrap_or_default(),
        notes: form.notes.clone().unwrap_or_default(),
        initial_appt_length: required_num(&form.initial_appt_length, "initial appointment length")?,
        follow_up_appt_length: required_num(
            &form.follow_up_appt_length,
            "follow-up appointment length",
        )?,
        num_patients_accepted: required_num(
            &form.num_patients_accepted,
            "accepted patient count",
        )?,
        requires_in_person_first_meeting: form.requires_in_person_first_meeting.is_some(),
    };

    let associations = AssociationSets {
        insurances: form.insurances.clone(),
        locations: form.locations.clone(),
        age_groups: form.age_groups.clone(),
        conditions: form.conditions.clone(),
        medications: form.medications.clone(),
    };

    Ok(UpsertPsychiatrist {
        attributes,
        associations,
    })
}
