use diesel::{dsl, ExpressionMethods, QueryDsl};
use diesel_async::RunQueryDsl;

use crate::db::{DaoError, DbAsyncPool};
use crate::models::visitor::{NewVisitor, Visitor, VisitorUpdate};
use crate::request_io::inputs::VisitorFields;
use crate::schema::visitors as visitor_fields;
use crate::schema::visitors::dsl::visitors;

pub struct Dao {
    db_async_pool: DbAsyncPool,
}

impl Dao {
    pub fn new(db_async_pool: &DbAsyncPool) -> Self {
        Self {
            db_async_pool: db_async_pool.clone(),
        }
    }

    /// Newest first. When `diary_id` is `None`, visitors of every diary entry are returned.
    pub async fn get_visitors(&self, diary_id: Option<i64>) -> Result<Vec<Visitor>, DaoError> {
        let mut query = visitors
            .order(visitor_fields::created_at.desc())
            .then_order_by(visitor_fields::id.desc())
            .into_boxed();

        if let Some(diary_id) = diary_id {
            query = query.filter(visitor_fields::site_diary_id.eq(diary_id));
        }

        let mut conn = self.db_async_pool.get().await?;
        Ok(query.load::<Visitor>(&mut conn).await?)
    }

    pub async fn create_visitor(
        &self,
        diary_id: i64,
        fields: &VisitorFields,
    ) -> Result<Visitor, DaoError> {
        let new_visitor = NewVisitor {
            site_diary_id: diary_id,
            name: &fields.name,
            company_name: fields.company_name.as_deref(),
            purpose_of_visit: fields.purpose_of_visit.as_deref(),
            email: fields.email.as_deref(),
            contact_details: fields.contact_details.as_deref(),
        };

        let mut conn = self.db_async_pool.get().await?;
        Ok(dsl::insert_into(visitors)
            .values(&new_visitor)
            .get_result::<Visitor>(&mut conn)
            .await?)
    }

    pub async fn update_visitor(
        &self,
        visitor_id: i64,
        fields: &VisitorFields,
    ) -> Result<Visitor, DaoError> {
        let visitor_update = VisitorUpdate {
            name: &fields.name,
            company_name: fields.company_name.as_deref(),
            purpose_of_visit: fields.purpose_of_visit.as_deref(),
            email: fields.email.as_deref(),
            contact_details: fields.contact_details.as_deref(),
        };

        let mut conn = self.db_async_pool.get().await?;
        Ok(dsl::update(visitors.find(visitor_id))
            .set(&visitor_update)
            .get_result::<Visitor>(&mut conn)
            .await?)
    }

    pub async fn delete_visitor(&self, visitor_id: i64) -> Result<(), DaoError> {
        let mut conn = self.db_async_pool.get().await?;
        let affected_row_count = diesel::delete(visitors.find(visitor_id))
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

    fn fields(name: &str) -> VisitorFields {
        VisitorFields {
            name: String::from(name),
            company_name: Some(String::from("Acme Surveying")),
            purpose_of_visit: None,
            email: Some(String::from("surveyor@acme.test")),
            contact_details: None,
        }
    }

    #[tokio::test]
    #[ignore = "requires a running Postgres instance"]
    async fn visitors_are_created_listed_updated_and_deleted() {
        let dao = dao();
        let mut conn = test_utils::db_async_conn().await;
        let diary = test_utils::insert_diary(&mut conn).await;
        let other_diary = test_utils::insert_diary(&mut conn).await;
        drop(conn);

        let first = dao.create_visitor(diary.id, &fields("Jo")).await.unwrap();
        let second = dao.create_visitor(diary.id, &fields("Sam")).await.unwrap();
        let elsewhere = dao
            .create_visitor(other_diary.id, &fields("Jo"))
            .await
            .unwrap();

        assert_eq!(first.site_diary_id, diary.id);
        assert_eq!(first.company_name.as_deref(), Some("Acme Surveying"));
        assert_eq!(first.purpose_of_visit, None);

        let listed = dao.get_visitors(Some(diary.id)).await.unwrap();
        assert_eq!(
            listed.iter().map(|v| v.id).collect::<Vec<_>>(),
            vec![second.id, first.id],
        );

        let all = dao.get_visitors(None).await.unwrap();
        assert!(all.iter().any(|v| v.id == elsewhere.id));

        let mut changed = fields("Jo Bloggs");
        changed.company_name = None;
        let updated = dao.update_visitor(first.id, &changed).await.unwrap();
        assert_eq!(updated.name, "Jo Bloggs");
        assert_eq!(updated.company_name, None);
        assert_eq!(updated.site_diary_id, diary.id);

        dao.delete_visitor(second.id).await.unwrap();
        assert!(dao.delete_visitor(second.id).await.unwrap_err().is_not_found());

        test_utils::delete_diary(diary.id).await;
        test_utils::delete_diary(other_diary.id).await;
    }

    #[tokio::test]
    #[ignore = "requires a running Postgres instance"]
    async fn duplicate_visitor_name_within_diary_is_a_unique_violation() {
        let dao = dao();
        let mut conn = test_utils::db_async_conn().await;
        let diary = test_utils::insert_diary(&mut conn).await;
        drop(conn);

        dao.create_visitor(diary.id, &fields("Alex")).await.unwrap();
        let err = dao
            .create_visitor(diary.id, &fields("Alex"))
            .await
            .unwrap_err();
        assert!(err.is_unique_violation());

        test_utils::delete_diary(diary.id).await;
    }

    #[tokio::test]
    #[ignore = "requires a running Postgres instance"]
    async fn visitor_for_missing_diary_is_a_foreign_key_violation() {
        let err = dao()
            .create_visitor(i64::MAX, &fields("Nobody"))
            .await
            .unwrap_err();
        assert!(err.is_foreign_key_violation());
    }
}
