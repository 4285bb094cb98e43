use chrono::Utc;
use diesel::{dsl, ExpressionMethods, QueryDsl};
use diesel_async::RunQueryDsl;

use crate::db::{DaoError, DbAsyncPool};
use crate::models::incident::{Incident, IncidentUpdate, NewIncident};
use crate::request_io::inputs::IncidentFields;
use crate::schema::incidents as incident_fields;
use crate::schema::incidents::dsl::incidents;

pub struct Dao {
    db_async_pool: DbAsyncPool,
}

impl Dao {
    pub fn new(db_async_pool: &DbAsyncPool) -> Self {
        Self {
            db_async_pool: db_async_pool.clone(),
        }
    }

    pub async fn get_incidents(&self, diary_id: Option<i64>) -> Result<Vec<Incident>, DaoError> {
        let mut query = incidents
            .order(incident_fields::created_at.desc())
            .then_order_by(incident_fields::id.desc())
            .into_boxed();

        if let Some(diary_id) = diary_id {
            query = query.filter(incident_fields::site_diary_id.eq(diary_id));
        }

        let mut conn = self.db_async_pool.get().await?;
        Ok(query.load::<Incident>(&mut conn).await?)
    }

    pub async fn create_incident(
        &self,
        diary_id: i64,
        fields: &IncidentFields,
    ) -> Result<Incident, DaoError> {
        let new_incident = NewIncident {
            site_diary_id: diary_id,
            title: &fields.title,
            description: &fields.description,
        };

        let mut conn = self.db_async_pool.get().await?;
        Ok(dsl::insert_into(incidents)
            .values(&new_incident)
            .get_result::<Incident>(&mut conn)
            .await?)
    }

    pub async fn update_incident(
        &self,
        incident_id: i64,
        fields: &IncidentFields,
    ) -> Result<Incident, DaoError> {
        let incident_update = IncidentUpdate {
            title: &fields.title,
            description: &fields.description,
            updated_at: Utc::now(),
        };

        let mut conn = self.db_async_pool.get().await?;
        Ok(dsl::update(incidents.find(incident_id))
            .set(&incident_update)
            .get_result::<Incident>(&mut conn)
            .await?)
    }

    pub async fn delete_incident(&self, incident_id: i64) -> Result<(), DaoError> {
        let mut conn = self.db_async_pool.get().await?;
        let affected_row_count = diesel::delete(incidents.find(incident_id))
            .execute(&mut conn)
            .await?;

        if affected_row_count == 0 {
            return Err(DaoError::QueryFailure(diesel::result::Error::NotFound));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_utils;

    fn dao() -> Dao {
        Dao::new(test_utils::db_async_pool())
    }

    #[tokio::test]
    #[ignore = "requires a running Postgres instance"]
    async fn incidents_are_scoped_to_their_diary() {
        let dao = dao();
        let mut conn = test_utils::db_async_conn().await;
        let diary = test_utils::insert_diary(&mut conn).await;
        let other_diary = test_utils::insert_diary(&mut conn).await;
        drop(conn);

        let fields = IncidentFields {
            title: String::from("Scaffold collapse"),
            description: String::from("North scaffold bay gave way; nobody hurt"),
        };

        let incident = dao.create_incident(diary.id, &fields).await.unwrap();
        dao.create_incident(other_diary.id, &fields).await.unwrap();

        let listed = dao.get_incidents(Some(diary.id)).await.unwrap();
        assert_eq!(listed, vec![incident.clone()]);

        let changed = IncidentFields {
            title: String::from("Scaffold partial collapse"),
            description: fields.description.clone(),
        };
        let updated = dao.update_incident(incident.id, &changed).await.unwrap();
        assert_eq!(updated.title, "Scaffold partial collapse");
        assert!(updated.updated_at >= incident.updated_at);

        dao.delete_incident(incident.id).await.unwrap();
        assert!(dao.get_incidents(Some(diary.id)).await.unwrap().is_empty());
        assert!(dao
            .delete_incident(incident.id)
            .await
            .unwrap_err()
            .is_not_found());

        test_utils::delete_diary(diary.id).await;
        test_utils::delete_diary(other_diary.id).await;
    }
}
