use chrono::{NaiveDate, Utc};
use diesel::{dsl, ExpressionMethods, OptionalExtension, QueryDsl};
use diesel_async::RunQueryDsl;

use crate::db::{DaoError, DbAsyncPool};
use crate::models::site_diary::{NewSiteDiary, SiteDiary, SiteDiaryUpdate};
use crate::schema::site_diaries as site_diary_fields;
use crate::schema::site_diaries::dsl::site_diaries;
use crate::weather::WeatherCondition;

pub struct Dao {
    db_async_pool: DbAsyncPool,
}

impl Dao {
    pub fn new(db_async_pool: &DbAsyncPool) -> Self {
        Self {
            db_async_pool: db_async_pool.clone(),
        }
    }

    /// Newest day first.
    pub async fn get_all_diaries(&self) -> Result<Vec<SiteDiary>, DaoError> {
        let mut conn = self.db_async_pool.get().await?;
        Ok(site_diaries
            .order(site_diary_fields::date.desc())
            .load::<SiteDiary>(&mut conn)
            .await?)
    }

    /// Same ordering as `get_all_diaries`, restricted to one id. Yields an empty list rather
    /// than `NotFound` when there is no such diary.
    pub async fn get_diaries_by_id(&self, diary_id: i64) -> Result<Vec<SiteDiary>, DaoError> {
        let mut conn = self.db_async_pool.get().await?;
        Ok(site_diaries
            .filter(site_diary_fields::id.eq(diary_id))
            .order(site_diary_fields::date.desc())
            .load::<SiteDiary>(&mut conn)
            .await?)
    }

    pub async fn get_diary(&self, diary_id: i64) -> Result<SiteDiary, DaoError> {
        let mut conn = self.db_async_pool.get().await?;
        Ok(site_diaries
            .find(diary_id)
            .get_result::<SiteDiary>(&mut conn)
            .await?)
    }

    pub async fn get_diary_id_by_date(&self, date: NaiveDate) -> Result<Option<i64>, DaoError> {
        let mut conn = self.db_async_pool.get().await?;
        Ok(site_diaries
            .select(site_diary_fields::id)
            .filter(site_diary_fields::date.eq(date))
            .get_result::<i64>(&mut conn)
            .await
            .optional()?)
    }

    pub async fn create_diary(
        &self,
        date: NaiveDate,
        description: &str,
        weather: WeatherCondition,
        temperature: Option<f64>,
    ) -> Result<SiteDiary, DaoError> {
        let new_diary = NewSiteDiary {
            date,
            description,
            weather,
            temperature,
        };

        let mut conn = self.db_async_pool.get().await?;
        Ok(dsl::insert_into(site_diaries)
            .values(&new_diary)
            .get_result::<SiteDiary>(&mut conn)
            .await?)
    }

    pub async fn update_diary(
        &self,
        diary_id: i64,
        date: NaiveDate,
        description: &str,
        weather: WeatherCondition,
        temperature: Option<f64>,
    ) -> Result<SiteDiary, DaoError> {
        let diary_update = SiteDiaryUpdate {
            date,
            description,
            weather,
            temperature,
            updated_at: Utc::now(),
        };

        let mut conn = self.db_async_pool.get().await?;
        Ok(dsl::update(site_diaries.find(diary_id))
            .set(&diary_update)
            .get_result::<SiteDiary>(&mut conn)
            .await?)
    }
}
