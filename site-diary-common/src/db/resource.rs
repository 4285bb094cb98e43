use diesel::{dsl, ExpressionMethods, QueryDsl};
use diesel_async::RunQueryDsl;

use crate::db::{DaoError, DbAsyncPool};
use crate::models::resource::{NewResource, Resource};
use crate::request_io::inputs::ResourceFields;
use crate::schema::resources as resource_fields;
use crate::schema::resources::dsl::resources;

pub struct Dao {
    db_async_pool: DbAsyncPool,
}

impl Dao {
    pub fn new(db_async_pool: &DbAsyncPool) -> Self {
        Self {
            db_async_pool: db_async_pool.clone(),
        }
    }

    /// The shared catalog, alphabetical by name.
    pub async fn get_all_resources(&self) -> Result<Vec<Resource>, DaoError> {
        let mut conn = self.db_async_pool.get().await?;
        Ok(resources
            .order(resource_fields::name.asc())
            .then_order_by(resource_fields::id.asc())
            .load::<Resource>(&mut conn)
            .await?)
    }

    pub async fn create_resource(&self, fields: &ResourceFields) -> Result<Resource, DaoError> {
        let new_resource = NewResource {
            name: &fields.name,
            unit_of_measurement: &fields.unit_of_measurement,
            serial_number: fields.serial_number.as_deref(),
        };

        let mut conn = self.db_async_pool.get().await?;
        Ok(dsl::insert_into(resources)
            .values(&new_resource)
            .get_result::<Resource>(&mut conn)
            .await?)
    }
}
