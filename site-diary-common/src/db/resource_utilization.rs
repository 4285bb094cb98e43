use diesel::{dsl, ExpressionMethods, QueryDsl, SelectableHelper};
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::db::{DaoError, DbAsyncPool};
use crate::models::resource::Resource;
use crate::models::resource_utilization::{
    NewResourceUtilization, ResourceUtilization, ResourceUtilizationUpdate,
    ResourceUtilizationWithResource,
};
use crate::schema::resource_utilization as resource_utilization_fields;
use crate::schema::resource_utilization::dsl::resource_utilization;
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

    /// Newest first. Rows are only joined with their catalog entry when scoped to one diary;
    /// the unscoped read is used for counting and leaves `resource` empty.
    pub async fn get_utilizations(
        &self,
        diary_id: Option<i64>,
    ) -> Result<Vec<ResourceUtilizationWithResource>, DaoError> {
        match diary_id {
            Some(diary_id) => self.get_utilizations_with_resource_for_diary(diary_id).await,
            None => {
                let mut conn = self.db_async_pool.get().await?;
                let rows = resource_utilization
                    .order(resource_utilization_fields::created_at.desc())
                    .then_order_by(resource_utilization_fields::id.desc())
                    .load::<ResourceUtilization>(&mut conn)
                    .await?;

                Ok(rows.into_iter().map(Into::into).collect())
            }
        }
    }

    pub async fn get_utilizations_with_resource_for_diary(
        &self,
        diary_id: i64,
    ) -> Result<Vec<ResourceUtilizationWithResource>, DaoError> {
        let mut conn = self.db_async_pool.get().await?;
        let rows = resource_utilization
            .inner_join(resources)
            .filter(resource_utilization_fields::site_diary_id.eq(diary_id))
            .order(resource_utilization_fields::created_at.desc())
            .then_order_by(resource_utilization_fields::id.desc())
            .select((ResourceUtilization::as_select(), Resource::as_select()))
            .load::<(ResourceUtilization, Resource)>(&mut conn)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get_utilization(
        &self,
        utilization_id: i64,
    ) -> Result<ResourceUtilization, DaoError> {
        let mut conn = self.db_async_pool.get().await?;
        Ok(resource_utilization
            .find(utilization_id)
            .get_result::<ResourceUtilization>(&mut conn)
            .await?)
    }

    pub async fn create_utilization(
        &self,
        diary_id: i64,
        resource_id: i64,
        value: f64,
    ) -> Result<ResourceUtilizationWithResource, DaoError> {
        let new_utilization = NewResourceUtilization {
            site_diary_id: diary_id,
            resource_id,
            value,
        };

        let mut conn = self.db_async_pool.get().await?;
        let utilization_id = dsl::insert_into(resource_utilization)
            .values(&new_utilization)
            .returning(resource_utilization_fields::id)
            .get_result::<i64>(&mut conn)
            .await?;

        Self::get_enriched(&mut conn, utilization_id).await
    }

    pub async fn update_utilization(
        &self,
        utilization_id: i64,
        resource_id: i64,
        value: f64,
    ) -> Result<ResourceUtilizationWithResource, DaoError> {
        let utilization_update = ResourceUtilizationUpdate { resource_id, value };

        let mut conn = self.db_async_pool.get().await?;
        dsl::update(resource_utilization.find(utilization_id))
            .set(&utilization_update)
            .returning(resource_utilization_fields::id)
            .get_result::<i64>(&mut conn)
            .await?;

        Self::get_enriched(&mut conn, utilization_id).await
    }

    pub async fn delete_utilization(&self, utilization_id: i64) -> Result<(), DaoError> {
        let mut conn = self.db_async_pool.get().await?;
        let affected_row_count = diesel::delete(resource_utilization.find(utilization_id))
            .execute(&mut conn)
            .await?;

        if affected_row_count == 0 {
            return Err(DaoError::QueryFailure(diesel::result::Error::NotFound));
        }

        Ok(())
    }

    async fn get_enriched(
        conn: &mut AsyncPgConnection,
        utilization_id: i64,
    ) -> Result<ResourceUtilizationWithResource, DaoError> {
        let row = resource_utilization
            .find(utilization_id)
            .inner_join(resources)
            .select((ResourceUtilization::as_select(), Resource::as_select()))
            .get_result::<(ResourceUtilization, Resource)>(conn)
            .await?;

        Ok(row.into())
    }
}
