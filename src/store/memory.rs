//! In-memory store backend
//!
//! Backs development and the test suite when no PostgreSQL instance is
//! configured. Assigns ids the way the database would and preserves
//! insertion order.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::store::Store;
use crate::types::{NewOwner, NewProperty, Owner, Property};
use crate::Result;

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    properties: Vec<Property>,
    owners: Vec<Owner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_properties(&self) -> Result<Vec<Property>> {
        Ok(self.inner.read().await.properties.clone())
    }

    async fn insert_property(&self, property: &NewProperty) -> Result<()> {
        let mut inner = self.inner.write().await;
        let id = inner.properties.len() as i32 + 1;
        inner.properties.push(Property {
            id,
            departamento: property.departamento.clone(),
            municipio: property.municipio.clone(),
            residencia: property.residencia.clone(),
            calle: property.calle.clone(),
            poligono: property.poligono.clone(),
            numero_casa: property.numero_casa,
            id_propietario: property.id_propietario,
        });
        Ok(())
    }

    async fn list_owners(&self) -> Result<Vec<Owner>> {
        Ok(self.inner.read().await.owners.clone())
    }

    async fn insert_owner(&self, owner: &NewOwner) -> Result<()> {
        let mut inner = self.inner.write().await;
        let id = inner.owners.len() as i32 + 1;
        inner.owners.push(Owner {
            id,
            nombres: owner.nombres.clone(),
            apellidos: owner.apellidos.clone(),
            fecha_nacimiento: owner.fecha_nacimiento,
            genero: owner.genero.clone(),
            telefono: owner.telefono.clone(),
            email: owner.email.clone(),
        });
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
