use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

use crate::list_state::HasId;
use crate::models::site_diary::SiteDiary;
use crate::schema::incidents;

#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Associations,
    Identifiable,
    Queryable,
    Selectable,
)]
#[diesel(belongs_to(SiteDiary, foreign_key = site_diary_id))]
#[diesel(table_name = incidents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Incident {
    pub id: i64,
    pub site_diary_id: i64,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = incidents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewIncident<'a> {
    pub site_diary_id: i64,
    pub title: &'a str,
    pub description: &'a str,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = incidents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct IncidentUpdate<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub updated_at: DateTime<Utc>,
}

impl HasId for Incident {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}
