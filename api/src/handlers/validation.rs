//! Request validation
//!
//! Structural validation runs inside the `ValidatedJson` extractor, before
//! any handler logic. `ValidatedPath` and `ValidatedQuery` fold axum's path
//! and query rejections into the same JSON error body. Update-specific
//! business rules live in `UpdatePatientValidator` and are invoked
//! explicitly by the update handler.

use std::sync::OnceLock;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use chrono::{NaiveDate, Utc};
use regex::Regex;
use serde::de::DeserializeOwned;

use super::patients::PatientRequest;
use crate::error::{AppError, DomainError};

const MAX_NAME_LEN: usize = 255;
const MIN_PHONE_LEN: usize = 7;
const MAX_PHONE_LEN: usize = 20;

/// A request shape that can check its own structure
pub trait Validate {
    fn validate(&self) -> Result<(), DomainError>;
}

/// JSON body extractor that rejects malformed bodies and runs `Validate`
///
/// Both failure modes surface as 400 responses through `AppError`.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        value.validate()?;

        Ok(Self(value))
    }
}

/// Path extractor whose rejections surface as `AppError::BadRequest`
#[derive(Debug)]
pub struct ValidatedPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        Ok(Self(value))
    }
}

/// Query string extractor whose rejections surface as `AppError::BadRequest`
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        Ok(Self(value))
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\+?[0-9 ()\-]+$").unwrap())
}

/// 7 to 20 characters in total, with at least 7 of them digits
fn is_valid_phone(phone: &str) -> bool {
    let len = phone.chars().count();
    let digits = phone.chars().filter(char::is_ascii_digit).count();

    (MIN_PHONE_LEN..=MAX_PHONE_LEN).contains(&len)
        && digits >= MIN_PHONE_LEN
        && phone_pattern().is_match(phone)
}

fn document_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9]{5,20}$").unwrap())
}

/// Present and non-blank, trimmed
fn provided(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Validate for PatientRequest {
    fn validate(&self) -> Result<(), DomainError> {
        let mut problems = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            problems.push("name must not be blank".to_string());
        } else if name.chars().count() > MAX_NAME_LEN {
            problems.push(format!("name must be at most {} characters", MAX_NAME_LEN));
        }

        // 1900-01-01 is always a valid date
        let earliest = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN);
        if self.dob > Utc::now().date_naive() {
            problems.push("dob must not be in the future".to_string());
        } else if self.dob < earliest {
            problems.push("dob must not be before 1900-01-01".to_string());
        }

        if let Some(email) = provided(&self.email) {
            if !email_pattern().is_match(email) {
                problems.push(format!("email '{}' is not a valid address", email));
            }
        }

        if let Some(phone) = provided(&self.phone) {
            if !is_valid_phone(phone) {
                problems.push(format!("phone '{}' is not a valid number", phone));
            }
        }

        if let Some(document) = provided(&self.document) {
            if !document_pattern().is_match(document) {
                problems.push("document must be 5 to 20 letters or digits".to_string());
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(problems.join("; ")))
        }
    }
}

/// Business rules that only apply when replacing an existing patient
pub struct UpdatePatientValidator;

impl UpdatePatientValidator {
    pub fn validate(request: &PatientRequest) -> Result<(), DomainError> {
        if provided(&request.document).is_some() {
            return Err(DomainError::Validation(
                "document cannot be changed after the patient is registered".to_string(),
            ));
        }

        Ok(())
    }
}
