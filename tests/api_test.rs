//! Integration tests for the catastro HTTP API
//!
//! Drives the real router end to end over the in-memory store backend,
//! plus a failing store double for the persistence-failure path.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use catastro::api::{create_router, AppState};
use catastro::store::memory::MemoryStore;
use catastro::store::Store;
use catastro::types::{NewOwner, NewProperty, Owner, Property};
use catastro::{Error, Result};

/// Helper: build the app over a fresh in-memory store.
fn test_app() -> axum::Router {
    let store = Arc::new(MemoryStore::new());
    create_router(AppState::new(store))
}

/// Helper: build the app over a store whose every operation fails.
fn failing_app() -> axum::Router {
    create_router(AppState::new(Arc::new(FailingStore)))
}

struct FailingStore;

#[async_trait]
impl Store for FailingStore {
    async fn list_properties(&self) -> Result<Vec<Property>> {
        Err(Error::store("connection refused"))
    }

    async fn insert_property(&self, _property: &NewProperty) -> Result<()> {
        Err(Error::store("connection refused"))
    }

    async fn list_owners(&self) -> Result<Vec<Owner>> {
        Err(Error::store("connection refused"))
    }

    async fn insert_owner(&self, _owner: &NewOwner) -> Result<()> {
        Err(Error::store("connection refused"))
    }

    async fn ping(&self) -> Result<()> {
        Err(Error::store("connection refused"))
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::http::Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn valid_property() -> Value {
    json!({
        "departamento": "Managua",
        "municipio": "Managua",
        "residencia": "Villa Fontana",
        "calle": "Avenida Central",
        "poligono": "B-12",
        "numeroCasa": 42,
        "idPropietario": 1,
    })
}

fn valid_owner() -> Value {
    json!({
        "nombres": "Ana María",
        "apellidos": "López García",
        "fechaNacimiento": "1990-05-17",
        "genero": "F",
        "telefono": "88112233",
        "email": "ana@example.com",
    })
}

// -- List endpoints -----------------------------------------------------------

#[tokio::test]
async fn test_lists_start_empty_and_are_idempotent() {
    let app = test_app();

    for uri in ["/inmuebles", "/propietarios"] {
        for _ in 0..2 {
            let response = app.clone().oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(
                response.headers()[header::CONTENT_TYPE],
                "application/json"
            );
            assert_eq!(body_json(response).await, json!([]));
        }
    }
}

// -- Create + list round trips ------------------------------------------------

#[tokio::test]
async fn test_create_property_then_list_includes_it() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_json("/inmuebles", &valid_property()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    let body = body_json(response).await;
    assert_eq!(body["message"], "Se ha creado el inmueble correctamente");

    let response = app.clone().oneshot(get("/inmuebles")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body,
        json!([{
            "id": 1,
            "departamento": "Managua",
            "municipio": "Managua",
            "residencia": "Villa Fontana",
            "calle": "Avenida Central",
            "poligono": "B-12",
            "numeroCasa": 42,
            "idPropietario": 1,
        }])
    );
}

#[tokio::test]
async fn test_create_owner_then_list_includes_it() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_json("/propietarios", &valid_owner()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Se ha creado el propietario correctamente");

    let response = app.clone().oneshot(get("/propietarios")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body[0]["id"], 1);
    assert_eq!(body[0]["fechaNacimiento"], "1990-05-17");
    assert_eq!(body[0]["genero"], "F");
    assert_eq!(body[0]["email"], "ana@example.com");
}

#[tokio::test]
async fn test_records_keep_insertion_order() {
    let app = test_app();

    for telefono in ["11111111", "22222222", "33333333"] {
        let mut owner = valid_owner();
        owner["telefono"] = json!(telefono);
        let response = app
            .clone()
            .oneshot(post_json("/propietarios", &owner))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let body = body_json(app.clone().oneshot(get("/propietarios")).await.unwrap()).await;
    let telefonos: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|owner| owner["telefono"].as_str().unwrap())
        .collect();
    assert_eq!(telefonos, ["11111111", "22222222", "33333333"]);
}

// -- Validation failures ------------------------------------------------------

#[tokio::test]
async fn test_owner_missing_email_rejected() {
    let app = test_app();
    let mut owner = valid_owner();
    owner.as_object_mut().unwrap().remove("email");

    let response = app
        .clone()
        .oneshot(post_json("/propietarios", &owner))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Error de validación");
    assert_eq!(body["errors"]["email"], json!(["is required"]));

    // Nothing was persisted.
    let body = body_json(app.clone().oneshot(get("/propietarios")).await.unwrap()).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_owner_malformed_email_rejected() {
    let app = test_app();
    let mut owner = valid_owner();
    owner["email"] = json!("not-an-email");

    let response = app
        .clone()
        .oneshot(post_json("/propietarios", &owner))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["errors"]["email"], json!(["must be a valid email address"]));
}

#[tokio::test]
async fn test_owner_short_phone_rejected() {
    let app = test_app();
    let mut owner = valid_owner();
    owner["telefono"] = json!("1234567");

    let response = app
        .clone()
        .oneshot(post_json("/propietarios", &owner))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["errors"]["telefono"].is_array());
}

#[tokio::test]
async fn test_owner_unknown_gender_rejected() {
    let app = test_app();
    let mut owner = valid_owner();
    owner["genero"] = json!("X");

    let response = app
        .clone()
        .oneshot(post_json("/propietarios", &owner))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["errors"]["genero"], json!(["must be one of: M, F"]));
}

#[tokio::test]
async fn test_property_field_type_and_length_rejected() {
    let app = test_app();

    let mut property = valid_property();
    property["numeroCasa"] = json!("42");
    let response = app
        .clone()
        .oneshot(post_json("/inmuebles", &property))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["errors"]["numeroCasa"], json!(["must be an integer"]));

    let mut property = valid_property();
    property["departamento"] = json!("a".repeat(31));
    let response = app
        .clone()
        .oneshot(post_json("/inmuebles", &property))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(
        body["errors"]["departamento"],
        json!(["must be between 1 and 30 characters"])
    );
}

#[tokio::test]
async fn test_multiple_failures_reported_together() {
    let app = test_app();
    let mut owner = valid_owner();
    owner["genero"] = json!("X");
    owner["telefono"] = json!("123");
    owner["email"] = json!("nope");

    let response = app
        .clone()
        .oneshot(post_json("/propietarios", &owner))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    let errors = body["errors"].as_object().unwrap();
    assert_eq!(errors.len(), 3);
}

#[tokio::test]
async fn test_non_object_body_rejected_with_validation_shape() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_json("/inmuebles", &json!([1, 2, 3])))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Error de validación");
    assert_eq!(body["errors"]["body"], json!(["must be a JSON object"]));
}

// -- Store failures -----------------------------------------------------------

#[tokio::test]
async fn test_create_against_failing_store_returns_500() {
    let app = failing_app();

    let response = app
        .clone()
        .oneshot(post_json("/propietarios", &valid_owner()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Error al crear el propietario");
    assert_eq!(body["error"], "connection refused");

    let response = app
        .clone()
        .oneshot(post_json("/inmuebles", &valid_property()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Error al crear el inmueble");
}

#[tokio::test]
async fn test_validation_runs_before_store() {
    // Even with a broken store, bad payloads get the 400 path.
    let app = failing_app();
    let mut owner = valid_owner();
    owner["genero"] = json!("X");

    let response = app
        .clone()
        .oneshot(post_json("/propietarios", &owner))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_against_failing_store_returns_500() {
    let app = failing_app();

    let response = app.clone().oneshot(get("/inmuebles")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Error al consultar los inmuebles");
    assert_eq!(body["error"], "connection refused");
}

// -- Health -------------------------------------------------------------------

#[tokio::test]
async fn test_health_reports_store_status() {
    let response = test_app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");

    let response = failing_app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
