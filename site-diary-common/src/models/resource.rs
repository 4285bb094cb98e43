use chrono::{DateTime, Utc};
use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

use crate::schema::resources;

#[derive(
    Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Identifiable, Queryable, Selectable,
)]
#[diesel(table_name = resources)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Resource {
    pub id: i64,
    pub name: String,
    pub unit_of_measurement: String,
    pub serial_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = resources)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewResource<'a> {
    pub name: &'a str,
    pub unit_of_measurement: &'a str,
    pub serial_number: Option<&'a str>,
}
