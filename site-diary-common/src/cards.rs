use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::fetch::DiaryData;
use crate::models::site_diary::SiteDiary;

/// A diary entry as listed on the overview page, with the sizes of its child lists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiaryCard {
    #[serde(flatten)]
    pub diary: SiteDiary,
    pub visitor_count: usize,
    pub incident_count: usize,
    pub equipment_count: usize,
}

fn count_by_diary<I>(diary_ids: I) -> HashMap<i64, usize>
where
    I: IntoIterator<Item = i64>,
{
    let mut counts = HashMap::new();
    for diary_id in diary_ids {
        *counts.entry(diary_id).or_insert(0) += 1;
    }

    counts
}

/// One card per diary row, in the order the rows were read. Child rows pointing at a diary
/// that isn't in `data.diaries` are not counted anywhere.
pub fn build_diary_cards(data: &DiaryData) -> Vec<DiaryCard> {
    let visitor_counts = count_by_diary(data.visitors.rows.iter().map(|v| v.site_diary_id));
    let incident_counts = count_by_diary(data.incidents.rows.iter().map(|i| i.site_diary_id));
    let equipment_counts = count_by_diary(
        data.resource_utilization
            .rows
            .iter()
            .map(|u| u.utilization.site_diary_id),
    );

    data.diaries
        .rows
        .iter()
        .map(|diary| DiaryCard {
            diary: diary.clone(),
            visitor_count: visitor_counts.get(&diary.id).copied().unwrap_or(0),
            incident_count: incident_counts.get(&diary.id).copied().unwrap_or(0),
            equipment_count: equipment_counts.get(&diary.id).copied().unwrap_or(0),
        })
        .collect()
}

#[cfg(test)]
pub mod test_rows {
    use chrono::{NaiveDate, TimeZone, Utc};

    use crate::models::incident::Incident;
    use crate::models::resource_utilization::{
        ResourceUtilization, ResourceUtilizationWithResource,
    };
    use crate::models::site_diary::SiteDiary;
    use crate::models::visitor::Visitor;
    use crate::weather::WeatherCondition;

    pub fn diary(id: i64, day: u32) -> SiteDiary {
        let stamp = Utc.with_ymd_and_hms(2024, 5, day, 8, 0, 0).unwrap();
        SiteDiary {
            id,
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            description: format!("Day {day}"),
            weather: WeatherCondition::Cloudy,
            temperature: None,
            created_at: stamp,
            updated_at: stamp,
        }
    }

    pub fn visitor(id: i64, site_diary_id: i64, name: &str) -> Visitor {
        Visitor {
            id,
            site_diary_id,
            name: String::from(name),
            company_name: None,
            purpose_of_visit: None,
            email: None,
            contact_details: None,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        }
    }

    pub fn incident(id: i64, site_diary_id: i64) -> Incident {
        let stamp = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        Incident {
            id,
            site_diary_id,
            title: String::from("Trip hazard"),
            description: String::from("Loose cable across walkway"),
            created_at: stamp,
            updated_at: stamp,
        }
    }

    pub fn utilization(
        id: i64,
        site_diary_id: i64,
        resource_id: i64,
    ) -> ResourceUtilizationWithResource {
        ResourceUtilization {
            id,
            site_diary_id,
            resource_id,
            value: 4.0,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 11, 0, 0).unwrap(),
        }
        .into()
    }
}
