use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::validators::{self, NumberInput, MAX_LONG_TEXT_LEN, MAX_SHORT_TEXT_LEN};
use crate::weather::WeatherCondition;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputSiteDiary {
    pub date: NaiveDate,
    pub description: String,
    pub weather: Option<String>,
    pub temperature: Option<NumberInput>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SiteDiaryFields {
    pub date: NaiveDate,
    pub description: String,
    pub weather: WeatherCondition,
    pub temperature: Option<f64>,
}

impl InputSiteDiary {
    pub fn normalize(&self, today: NaiveDate) -> Result<SiteDiaryFields, String> {
        validators::validate_not_future(self.date, today).into_result()?;

        let description =
            validators::required_text(&self.description, "Description", MAX_LONG_TEXT_LEN)?;

        let weather = match self.weather.as_deref().map(str::trim) {
            Some(w) if !w.is_empty() => WeatherCondition::from_str(w).map_err(|e| e.to_string())?,
            _ => return Err(String::from("Please select a weather condition.")),
        };

        let temperature = match &self.temperature {
            Some(t) => t
                .to_f64()
                .map_err(|e| format!("Invalid temperature: {e}"))?,
            None => None,
        };

        Ok(SiteDiaryFields {
            date: self.date,
            description,
            weather,
            temperature,
        })
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputVisitor {
    pub name: String,
    pub company_name: Option<String>,
    pub purpose_of_visit: Option<String>,
    pub email: Option<String>,
    pub contact_details: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VisitorFields {
    pub name: String,
    pub company_name: Option<String>,
    pub purpose_of_visit: Option<String>,
    pub email: Option<String>,
    pub contact_details: Option<String>,
}

impl InputVisitor {
    pub fn normalize(&self) -> Result<VisitorFields, String> {
        let name = validators::required_text(&self.name, "Visitor name", MAX_SHORT_TEXT_LEN)?;
        let company_name = validators::optional_text(
            self.company_name.as_deref(),
            "Company name",
            MAX_SHORT_TEXT_LEN,
        )?;
        let purpose_of_visit = validators::optional_text(
            self.purpose_of_visit.as_deref(),
            "Purpose of visit",
            MAX_LONG_TEXT_LEN,
        )?;
        let email = validators::optional_text(
            self.email.as_deref(),
            "Email",
            validators::MAX_EMAIL_LEN,
        )?;
        let contact_details = validators::optional_text(
            self.contact_details.as_deref(),
            "Contact details",
            MAX_SHORT_TEXT_LEN,
        )?;

        if let Some(email) = &email {
            validators::validate_email_address(email).into_result()?;
        }

        Ok(VisitorFields {
            name,
            company_name,
            purpose_of_visit,
            email,
            contact_details,
        })
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputIncident {
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IncidentFields {
    pub title: String,
    pub description: String,
}

impl InputIncident {
    pub fn normalize(&self) -> Result<IncidentFields, String> {
        if self.title.trim().is_empty() || self.description.trim().is_empty() {
            return Err(String::from("Title and description are required"));
        }

        Ok(IncidentFields {
            title: validators::required_text(&self.title, "Title", MAX_SHORT_TEXT_LEN)?,
            description: validators::required_text(
                &self.description,
                "Description",
                MAX_LONG_TEXT_LEN,
            )?,
        })
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputResource {
    pub name: String,
    pub unit_of_measurement: String,
    pub serial_number: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResourceFields {
    pub name: String,
    pub unit_of_measurement: String,
    pub serial_number: Option<String>,
}

impl InputResource {
    pub fn normalize(&self) -> Result<ResourceFields, String> {
        Ok(ResourceFields {
            name: validators::required_text(&self.name, "Resource name", MAX_SHORT_TEXT_LEN)?,
            unit_of_measurement: validators::required_text(
                &self.unit_of_measurement,
                "Unit of measurement",
                MAX_SHORT_TEXT_LEN,
            )?,
            serial_number: validators::optional_text(
                self.serial_number.as_deref(),
                "Serial number",
                MAX_SHORT_TEXT_LEN,
            )?,
        })
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputUtilization {
    pub resource_id: Option<i64>,
    pub value: Option<NumberInput>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UtilizationFields {
    pub resource_id: i64,
    pub value: f64,
}

impl InputUtilization {
    pub fn normalize(&self) -> Result<UtilizationFields, String> {
        let resource_id = self
            .resource_id
            .ok_or_else(|| String::from("Please select a resource."))?;

        let value = match &self.value {
            Some(v) => v.to_f64().map_err(|e| format!("Invalid amount: {e}"))?,
            None => None,
        };

        let value = value.ok_or_else(|| String::from("Please enter the amount used."))?;

        if value < 0.0 {
            return Err(String::from("Amount used cannot be negative."));
        }

        Ok(UtilizationFields { resource_id, value })
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct InputResourceQuery {
    pub q: Option<String>,
    pub editing: Option<i64>,
}
