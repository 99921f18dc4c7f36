//! PostgreSQL store backend
//!
//! Each operation is a single parameterized statement against one of the two
//! tables. Rows map through private `FromRow` structs so the wire types stay
//! free of SQLx derives. The reference DDL lives in `schema.sql`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::store::Store;
use crate::types::{NewOwner, NewProperty, Owner, Property};
use crate::Result;

pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect and build the connection pool.
    pub async fn connect(
        url: &str,
        max_connections: u32,
        acquire_timeout_secs: u64,
    ) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
            .connect(url)
            .await?;

        tracing::info!("Connected to PostgreSQL");

        Ok(Self { pool })
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn list_properties(&self) -> Result<Vec<Property>> {
        let rows = sqlx::query_as::<_, PropertyRow>(
            "SELECT id, departamento, municipio, residencia, calle, poligono, \
                    numero_casa, id_propietario \
             FROM inmuebles ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PropertyRow::into_record).collect())
    }

    async fn insert_property(&self, property: &NewProperty) -> Result<()> {
        sqlx::query(
            "INSERT INTO inmuebles \
                 (departamento, municipio, residencia, calle, poligono, numero_casa, id_propietario) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&property.departamento)
        .bind(&property.municipio)
        .bind(&property.residencia)
        .bind(&property.calle)
        .bind(&property.poligono)
        .bind(property.numero_casa)
        .bind(property.id_propietario)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_owners(&self) -> Result<Vec<Owner>> {
        let rows = sqlx::query_as::<_, OwnerRow>(
            "SELECT id, nombres, apellidos, fecha_nacimiento, genero, telefono, email \
             FROM propietarios ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(OwnerRow::into_record).collect())
    }

    async fn insert_owner(&self, owner: &NewOwner) -> Result<()> {
        sqlx::query(
            "INSERT INTO propietarios \
                 (nombres, apellidos, fecha_nacimiento, genero, telefono, email) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&owner.nombres)
        .bind(&owner.apellidos)
        .bind(owner.fecha_nacimiento)
        .bind(&owner.genero)
        .bind(&owner.telefono)
        .bind(&owner.email)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct PropertyRow {
    id: i32,
    departamento: String,
    municipio: String,
    residencia: String,
    calle: String,
    poligono: String,
    numero_casa: i32,
    id_propietario: i32,
}

impl PropertyRow {
    fn into_record(self) -> Property {
        Property {
            id: self.id,
            departamento: self.departamento,
            municipio: self.municipio,
            residencia: self.residencia,
            calle: self.calle,
            poligono: self.poligono,
            numero_casa: self.numero_casa,
            id_propietario: self.id_propietario,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OwnerRow {
    id: i32,
    nombres: String,
    apellidos: String,
    fecha_nacimiento: NaiveDate,
    genero: String,
    telefono: String,
    email: String,
}

impl OwnerRow {
    fn into_record(self) -> Owner {
        Owner {
            id: self.id,
            nombres: self.nombres,
            apellidos: self.apellidos,
            fecha_nacimiento: self.fecha_nacimiento,
            genero: self.genero,
            telefono: self.telefono,
            email: self.email,
        }
    }
}
