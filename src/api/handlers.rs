//! API handlers
//!
//! Every write follows the same shape: validate the raw payload against the
//! resource schema, then hand the typed record to the store. Validation
//! failures never reach the store; store failures surface as 500 with the
//! per-resource message and the underlying error text.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::api::AppState;
use crate::types::{NewOwner, NewProperty, Owner, Property};
use crate::validate::{self, FieldSpec, ValidationErrors};
use crate::Error;

// Wire messages; part of the public JSON contract.
const VALIDATION_FAILED: &str = "Error de validación";
const PROPERTY_CREATED: &str = "Se ha creado el inmueble correctamente";
const OWNER_CREATED: &str = "Se ha creado el propietario correctamente";
const PROPERTY_CREATE_FAILED: &str = "Error al crear el inmueble";
const OWNER_CREATE_FAILED: &str = "Error al crear el propietario";
const PROPERTY_LIST_FAILED: &str = "Error al consultar los inmuebles";
const OWNER_LIST_FAILED: &str = "Error al consultar los propietarios";
const HEALTH_FAILED: &str = "Error de conexión con la base de datos";

/// Health check with store connectivity probe
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    state
        .store
        .ping()
        .await
        .map_err(|e| ApiError::new(e, HEALTH_FAILED))?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// List all properties in insertion order
pub async fn list_properties(
    State(state): State<AppState>,
) -> Result<Json<Vec<Property>>, ApiError> {
    let properties = state
        .store
        .list_properties()
        .await
        .map_err(|e| ApiError::new(e, PROPERTY_LIST_FAILED))?;

    Ok(Json(properties))
}

/// Validate and persist one property
pub async fn create_property(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<MessageResponse>, ApiError> {
    let property: NewProperty =
        parse_payload(validate::PROPERTY_SCHEMA, payload, PROPERTY_CREATE_FAILED)?;

    state
        .store
        .insert_property(&property)
        .await
        .map_err(|e| ApiError::new(e, PROPERTY_CREATE_FAILED))?;

    Ok(Json(MessageResponse {
        message: PROPERTY_CREATED.to_string(),
    }))
}

/// List all owners in insertion order
pub async fn list_owners(State(state): State<AppState>) -> Result<Json<Vec<Owner>>, ApiError> {
    let owners = state
        .store
        .list_owners()
        .await
        .map_err(|e| ApiError::new(e, OWNER_LIST_FAILED))?;

    Ok(Json(owners))
}

/// Validate and persist one owner
pub async fn create_owner(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<MessageResponse>, ApiError> {
    let owner: NewOwner = parse_payload(validate::OWNER_SCHEMA, payload, OWNER_CREATE_FAILED)?;

    state
        .store
        .insert_owner(&owner)
        .await
        .map_err(|e| ApiError::new(e, OWNER_CREATE_FAILED))?;

    Ok(Json(MessageResponse {
        message: OWNER_CREATED.to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Run the schema over the raw payload, then deserialize the known-good value.
fn parse_payload<T: DeserializeOwned>(
    schema: &[FieldSpec],
    payload: Value,
    failure_message: &'static str,
) -> Result<T, ApiError> {
    validate::check(schema, &payload).map_err(|e| ApiError::new(e, failure_message))?;

    serde_json::from_value(payload).map_err(|e| {
        // Unreachable for payloads the schema accepts; reported in the same
        // shape as any other rejected body.
        let mut errors = ValidationErrors::default();
        errors.push("body", e.to_string());
        ApiError::new(Error::Validation(errors), failure_message)
    })
}

/// A request-stage failure plus the message its 500 body would carry.
///
/// Maps the two error kinds onto the wire contract:
/// 400 `{message, errors}` for validation, 500 `{message, error}` for the store.
pub struct ApiError {
    error: Error,
    failure_message: &'static str,
}

impl ApiError {
    fn new(error: Error, failure_message: &'static str) -> Self {
        Self {
            error,
            failure_message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.error {
            Error::Validation(errors) => {
                tracing::debug!(fields = errors.len(), "Rejected payload with validation errors");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "message": VALIDATION_FAILED,
                        "errors": errors,
                    })),
                )
                    .into_response()
            }
            Error::Store(detail) => {
                tracing::warn!(error = %detail, "Store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "message": self.failure_message,
                        "error": detail,
                    })),
                )
                    .into_response()
            }
        }
    }
}
