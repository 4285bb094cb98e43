pub mod incident;
pub mod resource;
pub mod resource_utilization;
pub mod site_diary;
pub mod visitor;
