//! Core record types for catastro
//!
//! Wire field names are camelCase to match the public JSON contract;
//! the stored column names are the snake_case equivalents.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stored property row, as returned by the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: i32,
    pub departamento: String,
    pub municipio: String,
    pub residencia: String,
    pub calle: String,
    pub poligono: String,
    pub numero_casa: i32,
    pub id_propietario: i32,
}

/// A property create payload, after validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewProperty {
    pub departamento: String,
    pub municipio: String,
    pub residencia: String,
    pub calle: String,
    pub poligono: String,
    pub numero_casa: i32,
    pub id_propietario: i32,
}

/// A stored owner row, as returned by the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: i32,
    pub nombres: String,
    pub apellidos: String,
    pub fecha_nacimiento: NaiveDate,
    pub genero: String,
    pub telefono: String,
    pub email: String,
}

/// An owner create payload, after validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewOwner {
    pub nombres: String,
    pub apellidos: String,
    pub fecha_nacimiento: NaiveDate,
    pub genero: String,
    pub telefono: String,
    pub email: String,
}
