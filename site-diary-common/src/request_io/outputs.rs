use serde::{Deserialize, Serialize};

use crate::models::incident::Incident;
use crate::models::resource_utilization::ResourceUtilizationWithResource;
use crate::models::site_diary::SiteDiary;
use crate::models::visitor::Visitor;
use crate::resource_picker::ResourceOption;
use crate::weather::WeatherCondition;

pub use crate::cards::DiaryCard;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiaryDetail {
    pub diary: SiteDiary,
    pub visitors: Vec<Visitor>,
    pub equipment: Vec<ResourceUtilizationWithResource>,
    pub incidents: Vec<Incident>,
    pub visitor_count: usize,
    pub incident_count: usize,
    pub equipment_count: usize,
}

impl DiaryDetail {
    pub fn new(
        diary: SiteDiary,
        visitors: Vec<Visitor>,
        equipment: Vec<ResourceUtilizationWithResource>,
        incidents: Vec<Incident>,
    ) -> Self {
        Self {
            visitor_count: visitors.len(),
            incident_count: incidents.len(),
            equipment_count: equipment.len(),
            diary,
            visitors,
            equipment,
            incidents,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputResourceOptions {
    pub options: Vec<ResourceOption>,
    pub can_create: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputWeatherCondition {
    pub value: WeatherCondition,
    pub label: String,
}

impl From<WeatherCondition> for OutputWeatherCondition {
    fn from(condition: WeatherCondition) -> Self {
        Self {
            value: condition,
            label: String::from(condition.label()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    // 400
    IncorrectlyFormed,
    InvalidState,
    // 409
    ConflictWithExisting,
    // 404
    DiaryDoesNotExist,
    VisitorDoesNotExist,
    IncidentDoesNotExist,
    UtilizationDoesNotExist,
    ResourceDoesNotExist,
    ForeignKeyDoesNotExist,
    // 413
    InputTooLarge,
    // 500
    InternalError,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServerErrorResponse {
    pub err_type: ErrorType,
    pub err_message: String,
}
