use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

use crate::list_state::HasId;
use crate::models::resource::Resource;
use crate::models::site_diary::SiteDiary;
use crate::schema::resource_utilization;

#[derive(
    Clone, Debug, PartialEq, Serialize, Deserialize, Associations, Identifiable, Queryable, Selectable,
)]
#[diesel(belongs_to(SiteDiary, foreign_key = site_diary_id))]
#[diesel(belongs_to(Resource, foreign_key = resource_id))]
#[diesel(table_name = resource_utilization)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ResourceUtilization {
    pub id: i64,
    pub site_diary_id: i64,
    pub resource_id: i64,
    pub value: f64,
    pub created_at: DateTime<Utc>,
}

/// A utilization row as shown on a diary entry's equipment list. `resource` is only populated
/// when the row was read together with its catalog entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceUtilizationWithResource {
    #[serde(flatten)]
    pub utilization: ResourceUtilization,
    pub resource: Option<Resource>,
}

impl From<ResourceUtilization> for ResourceUtilizationWithResource {
    fn from(utilization: ResourceUtilization) -> Self {
        Self {
            utilization,
            resource: None,
        }
    }
}

impl From<(ResourceUtilization, Resource)> for ResourceUtilizationWithResource {
    fn from((utilization, resource): (ResourceUtilization, Resource)) -> Self {
        Self {
            utilization,
            resource: Some(resource),
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = resource_utilization)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewResourceUtilization {
    pub site_diary_id: i64,
    pub resource_id: i64,
    pub value: f64,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = resource_utilization)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ResourceUtilizationUpdate {
    pub resource_id: i64,
    pub value: f64,
}

impl HasId for ResourceUtilization {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

impl HasId for ResourceUtilizationWithResource {
    type Id = i64;

    fn id(&self) -> i64 {
        self.utilization.id
    }
}
