use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

use crate::list_state::HasId;
use crate::models::site_diary::SiteDiary;
use crate::schema::visitors;

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
#[diesel(table_name = visitors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Visitor {
    pub id: i64,
    pub site_diary_id: i64,
    pub name: String,
    pub company_name: Option<String>,
    pub purpose_of_visit: Option<String>,
    pub email: Option<String>,
    pub contact_details: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Visitor {
    /// Whether there is anything to show when the row is expanded.
    pub fn has_details(&self) -> bool {
        self.company_name.is_some()
            || self.email.is_some()
            || self.contact_details.is_some()
            || self.purpose_of_visit.is_some()
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = visitors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewVisitor<'a> {
    pub site_diary_id: i64,
    pub name: &'a str,
    pub company_name: Option<&'a str>,
    pub purpose_of_visit: Option<&'a str>,
    pub email: Option<&'a str>,
    pub contact_details: Option<&'a str>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = visitors, treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct VisitorUpdate<'a> {
    pub name: &'a str,
    pub company_name: Option<&'a str>,
    pub purpose_of_visit: Option<&'a str>,
    pub email: Option<&'a str>,
    pub contact_details: Option<&'a str>,
}

impl HasId for Visitor {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}
