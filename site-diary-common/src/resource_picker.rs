use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::resource::Resource;
use crate::models::resource_utilization::ResourceUtilizationWithResource;

/// Resources already attached to one diary entry's equipment list.
#[derive(Clone, Debug, Default)]
pub struct UsedResourceIds(HashSet<i64>);

impl UsedResourceIds {
    /// `editing_id` is the utilization row currently being edited, if any. Its resource stays
    /// selectable so the row can keep it.
    pub fn new(utilizations: &[ResourceUtilizationWithResource], editing_id: Option<i64>) -> Self {
        Self(
            utilizations
                .iter()
                .filter(|u| Some(u.utilization.id) != editing_id)
                .map(|u| u.utilization.resource_id)
                .collect(),
        )
    }

    pub fn contains(&self, resource_id: i64) -> bool {
        self.0.contains(&resource_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceOption {
    #[serde(flatten)]
    pub resource: Resource,
    pub already_added: bool,
}

/// Case-insensitive substring search over name, unit and serial number. A blank query
/// matches everything.
pub fn filter_resources<'a>(resources: &'a [Resource], query: &str) -> Vec<&'a Resource> {
    if query.trim().is_empty() {
        return resources.iter().collect();
    }

    let query = query.to_lowercase();
    resources
        .iter()
        .filter(|r| {
            r.name.to_lowercase().contains(&query)
                || r.unit_of_measurement.to_lowercase().contains(&query)
                || r
                    .serial_number
                    .as_ref()
                    .is_some_and(|s| s.to_lowercase().contains(&query))
        })
        .collect()
}

pub fn has_exact_match(resources: &[Resource], query: &str) -> bool {
    let query = query.trim().to_lowercase();
    resources.iter().any(|r| r.name.to_lowercase() == query)
}

/// Whether the picker should offer to create a new catalog entry named after the query.
pub fn can_create_from_query(resources: &[Resource], query: &str) -> bool {
    !query.trim().is_empty() && !has_exact_match(resources, query)
}

pub fn resource_options(
    resources: &[Resource],
    query: &str,
    used: &UsedResourceIds,
) -> Vec<ResourceOption> {
    filter_resources(resources, query)
        .into_iter()
        .map(|r| ResourceOption {
            resource: r.clone(),
            already_added: used.contains(r.id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::test_rows::utilization;
    use chrono::Utc;

    fn resource(id: i64, name: &str, unit: &str, serial: Option<&str>) -> Resource {
        Resource {
            id,
            name: String::from(name),
            unit_of_measurement: String::from(unit),
            serial_number: serial.map(String::from),
            created_at: Utc::now(),
        }
    }

    fn catalog() -> Vec<Resource> {
        vec![
            resource(1, "Excavator", "hours", Some("EX-2201")),
            resource(2, "Concrete", "m3", None),
            resource(3, "Scaffold tower", "days", Some("ST-9")),
        ]
    }

    #[test]
    fn used_ids_exclude_the_row_being_edited() {
        let rows = vec![utilization(10, 1, 1), utilization(11, 1, 2)];

        let used = UsedResourceIds::new(&rows, None);
        assert!(used.contains(1) && used.contains(2));
        assert_eq!(used.len(), 2);

        let used = UsedResourceIds::new(&rows, Some(10));
        assert!(!used.contains(1));
        assert!(used.contains(2));

        assert!(UsedResourceIds::new(&[], None).is_empty());
    }

    #[test]
    fn filter_matches_name_unit_or_serial_ignoring_case() {
        let catalog = catalog();
        let names = |q: &str| -> Vec<String> {
            filter_resources(&catalog, q)
                .into_iter()
                .map(|r| r.name.clone())
                .collect()
        };

        assert_eq!(names("EXCAV"), vec!["Excavator"]);
        assert_eq!(names("M3"), vec!["Concrete"]);
        assert_eq!(names("st-9"), vec!["Scaffold tower"]);
        assert_eq!(names("o"), vec!["Excavator", "Concrete", "Scaffold tower"]);
        assert!(names("crane").is_empty());
    }

    #[test]
    fn empty_query_returns_whole_catalog() {
        assert_eq!(filter_resources(&catalog(), "").len(), 3);
    }

    #[test]
    fn whitespace_query_returns_whole_catalog() {
        let catalog = catalog();
        assert_eq!(filter_resources(&catalog, "  ").len(), 3);
        assert_eq!(filter_resources(&catalog, "\t").len(), 3);

        let options = resource_options(&catalog, "   ", &UsedResourceIds::default());
        assert_eq!(options.len(), 3);
        assert!(!can_create_from_query(&catalog, "   "));
    }

    #[test]
    fn exact_match_drives_create_offer() {
        let catalog = catalog();

        assert!(has_exact_match(&catalog, "concrete"));
        assert!(has_exact_match(&catalog, "  Concrete "));
        assert!(!has_exact_match(&catalog, "Concre"));

        assert!(!can_create_from_query(&catalog, "CONCRETE"));
        assert!(can_create_from_query(&catalog, "Crane"));
        assert!(!can_create_from_query(&catalog, "   "));
    }

    #[test]
    fn options_mark_attached_resources() {
        let catalog = catalog();
        let used = UsedResourceIds::new(&[utilization(10, 1, 2)], None);

        let options = resource_options(&catalog, "", &used);

        assert_eq!(options.len(), 3);
        assert!(!options[0].already_added);
        assert!(options[1].already_added);
        assert_eq!(options[1].resource.name, "Concrete");
        assert!(!options[2].already_added);
    }
}
