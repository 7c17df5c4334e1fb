//! Patient handlers
//!
//! Endpoints for patient registration and maintenance. Handlers only adapt
//! HTTP to the patient service; errors propagate unchanged to `AppError`.

use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::validation::{UpdatePatientValidator, ValidatedJson, ValidatedPath, ValidatedQuery};
use crate::domain::entities::PatientId;
use crate::domain::ports::PatientRepository;
use crate::error::AppError;
use crate::AppState;

/// Query parameters for listing patients
#[derive(Debug, Deserialize)]
pub struct ListPatientsQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

/// Patient fields accepted on create and update
#[derive(Debug, Clone, Deserialize)]
pub struct PatientRequest {
    pub name: String,
    /// Date of birth, `YYYY-MM-DD`
    pub dob: NaiveDate,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// National identity document; only accepted on create
    #[serde(default)]
    pub document: Option<String>,
}

/// Patient as presented to callers
#[derive(Debug, Serialize)]
pub struct PatientResponse {
    pub id: i64,
    pub name: String,
    pub dob: NaiveDate,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub document: Option<String>,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// POST /patient
///
/// Register a new patient.
pub async fn create_patient<PR>(
    State(state): State<AppState<PR>>,
    ValidatedJson(request): ValidatedJson<PatientRequest>,
) -> Result<Json<PatientResponse>, AppError>
where
    PR: PatientRepository + 'static,
{
    let patient = state
        .patient_service
        .create_patient(state.patient_mapper.to_entity(&request))
        .await?;

    Ok(Json(state.patient_mapper.to_response(patient)))
}

/// GET /patient
///
/// List active patients.
pub async fn list_patients<PR>(
    State(state): State<AppState<PR>>,
    ValidatedQuery(query): ValidatedQuery<ListPatientsQuery>,
) -> Result<Json<Vec<PatientResponse>>, AppError>
where
    PR: PatientRepository + 'static,
{
    let patients = state
        .patient_service
        .list_patients(query.limit, query.offset)
        .await?;

    let responses: Vec<PatientResponse> = patients
        .into_iter()
        .map(|p| state.patient_mapper.to_response(p))
        .collect();

    Ok(Json(responses))
}

/// GET /patient/:id
///
/// Get a patient, including soft-deleted ones.
pub async fn get_patient_by_id<PR>(
    State(state): State<AppState<PR>>,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<Json<PatientResponse>, AppError>
where
    PR: PatientRepository + 'static,
{
    let id = PatientId::parse(id)?;
    let patient = state.patient_service.get_patient_by_id(&id).await?;

    Ok(Json(state.patient_mapper.to_response(patient)))
}

/// PUT /patient/:id
///
/// Replace a patient's editable fields.
/// Update-only rules are checked before the service is called.
pub async fn update_patient<PR>(
    State(state): State<AppState<PR>>,
    ValidatedPath(id): ValidatedPath<i64>,
    ValidatedJson(request): ValidatedJson<PatientRequest>,
) -> Result<Json<PatientResponse>, AppError>
where
    PR: PatientRepository + 'static,
{
    let id = PatientId::parse(id)?;
    UpdatePatientValidator::validate(&request)?;

    let patient = state
        .patient_service
        .update_patient(&id, state.patient_mapper.to_changes(&request))
        .await?;

    Ok(Json(state.patient_mapper.to_response(patient)))
}

/// DELETE /patient/:id
///
/// Soft delete a patient by marking it inactive.
pub async fn delete_patient<PR>(
    State(state): State<AppState<PR>>,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<StatusCode, AppError>
where
    PR: PatientRepository + 'static,
{
    let id = PatientId::parse(id)?;
    state.patient_service.delete_patient(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
