//! Public search routes: filter options and the search submission.

use axum::{extract::Extension, http::StatusCode, Json};
use axum_extra::extract::Form;
use serde::Deserialize;
use tracing::{error, info};

use crate::common::IntakeError;
use crate::domains::psychiatrists::actions::search_psychiatrists;
use crate::domains::psychiatrists::data::PsychiatristData;
use crate::domains::psychiatrists::models::search::SearchCriteria;
use crate::domains::taxonomy::actions::list_options;
use crate::domains::taxonomy::models::entity::EntityOptions;
use crate::server::app::AppState;
use crate::server::routes::admin::ErrorResponse;

/// Search form submission. Single-select fields arrive as strings because an
/// unselected `<select>` posts an empty value; checkboxes count as presence.
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    pub insurance_id: Option<String>,
    pub insurance_id2: Option<String>,
    pub location_id: Option<String>,
    pub age_group_id: Option<String>,
    #[serde(default)]
    pub medication_ids: Vec<i32>,
    #[serde(default)]
    pub condition_ids: Vec<i32>,
    pub prefer_telehealth: Option<String>,
}

/// Parse an optional id field, treating an empty submission as absent.
pub(crate) fn optional_id(value: &Option<String>, field: &str) -> Result<Option<i32>, IntakeError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| IntakeError::Validation(format!("Invalid {}: {}", field, raw))),
    }
}

impl SearchForm {
    fn into_criteria(self) -> Result<SearchCriteria, IntakeError> {
        Ok(SearchCriteria {
            insurance_id: optional_id(&self.insurance_id, "insurance id")?,
            insurance_id2: optional_id(&self.insurance_id2, "insurance id")?,
            location_id: optional_id(&self.location_id, "location id")?,
            age_group_id: optional_id(&self.age_group_id, "age group id")?,
            medication_ids: self.medication_ids,
            condition_ids: self.condition_ids,
            prefer_telehealth: self.prefer_telehealth.is_some(),
        })
    }
}

/// GET / - the filter options backing the public search form.
pub async fn filter_options_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<EntityOptions>, (StatusCode, Json<ErrorResponse>)> {
    list_options(&state.db_pool).await.map(Json).map_err(|err| {
        error!(error = %err, "Failed to load filter options");
        (err.status(), Json(ErrorResponse::from(&err)))
    })
}

/// POST /search - run the matching query over the submitted criteria.
pub async fn search_handler(
    Extension(state): Extension<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Json<Vec<PsychiatristData>>, (StatusCode, Json<ErrorResponse>)> {
    let result = async {
        let criteria = form.into_criteria()?;
        search_psychiatrists(&criteria, &state.db_pool).await
    }
    .await;

    match result {
        Ok(psychiatrists) => {
            info!(matches = psychiatrists.len(), "Search request served");
            Ok(Json(psychiatrists))
        }
        Err(err) => {
            error!(error = %err, "Search request failed");
            Err((err.status(), Json(ErrorResponse::from(&err))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_select_value_is_no_filter() {
        assert_eq!(optional_id(&Some("".to_string()), "insurance id").unwrap(), None);
        assert_eq!(optional_id(&None, "insurance id").unwrap(), None);
    }

    #[test]
    fn present_select_value_parses() {
        assert_eq!(
            optional_id(&Some("7".to_string()), "insurance id").unwrap(),
            Some(7)
        );
    }

    #[test]
    fn malformed_select_value_is_a_validation_fault() {
        let err = optional_id(&Some("seven".to_string()), "insurance id").unwrap_err();
        assert!(matches!(err, IntakeError::Validation(_)));
    }
}
