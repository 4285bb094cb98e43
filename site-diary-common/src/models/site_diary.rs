use chrono::{DateTime, NaiveDate, Utc};
use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

use crate::list_state::HasId;
use crate::schema::site_diaries;
use crate::weather::WeatherCondition;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Identifiable, Queryable, Selectable)]
#[diesel(table_name = site_diaries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SiteDiary {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub weather: WeatherCondition,
    pub temperature: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = site_diaries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewSiteDiary<'a> {
    pub date: NaiveDate,
    pub description: &'a str,
    pub weather: WeatherCondition,
    pub temperature: Option<f64>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = site_diaries, treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SiteDiaryUpdate<'a> {
    pub date: NaiveDate,
    pub description: &'a str,
    pub weather: WeatherCondition,
    pub temperature: Option<f64>,
    pub updated_at: DateTime<Utc>,
}

impl HasId for SiteDiary {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}
