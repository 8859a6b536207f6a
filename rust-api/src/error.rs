use actix_web::{error::BlockingError, http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::{BetLeg, ErrorResponse};
use crate::store::StoreError;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid request data
    #[error("Validation error: {0}")]
    ValidationError(String),
    /// Unknown bet or room
    #[error("Not found: {0}")]
    NotFound(String),
    /// Internal server error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::BetNotFound(_) => AppError::NotFound(err.to_string()),
            StoreError::InvalidLegIndex { .. }
            | StoreError::LastLeg
            | StoreError::InvalidRoomId(_) => AppError::ValidationError(err.to_string()),
            StoreError::Io(_) | StoreError::Json(_) => AppError::InternalError(err.to_string()),
        }
    }
}

impl From<BlockingError> for AppError {
    fn from(err: BlockingError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message) = match self {
            AppError::ValidationError(msg) => ("validation_error", msg.clone()),
            AppError::NotFound(msg) => ("not_found", msg.clone()),
            AppError::InternalError(msg) => ("internal_error", msg.clone()),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: error_code.to_string(),
            message,
        })
    }
}

/// Validation functions
pub fn validate_legs_present(legs: &[BetLeg]) -> Result<(), AppError> {
    if legs.is_empty() {
        return Err(AppError::ValidationError(
            "At least one leg is required".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_leg(leg: &BetLeg) -> Result<(), AppError> {
    if leg.player.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Each leg must name a player".to_string(),
        ));
    }
    if leg.stat.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Each leg must name a stat".to_string(),
        ));
    }
    if !leg.goal.is_finite() || leg.goal <= 0.0 {
        return Err(AppError::ValidationError(format!(
            "Goal must be a positive number, got {}",
            leg.goal
        )));
    }
    Ok(())
}

pub fn validate_amount(name: &str, amount: Option<f64>) -> Result<(), AppError> {
    match amount {
        Some(value) if !value.is_finite() || value < 0.0 => Err(AppError::ValidationError(
            format!("{} must be non-negative, got {}", name, value),
        )),
        _ => Ok(()),
    }
}

/// Full check for a create/update body
pub fn validate_bet_request(
    legs: &[BetLeg],
    bet_amount: Option<f64>,
    payout_amount: Option<f64>,
) -> Result<(), AppError> {
    validate_legs_present(legs)?;
    for leg in legs {
        validate_leg(leg)?;
    }
    validate_amount("betAmount", bet_amount)?;
    validate_amount("payoutAmount", payout_amount)?;
    Ok(())
}
