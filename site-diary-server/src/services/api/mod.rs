use actix_web::web::*;

use crate::handlers::error::{json_error_handler, path_error_handler, query_error_handler};

mod diary;
mod equipment;
mod health;
mod incident;
mod resource;
mod visitor;

const MAX_JSON_BODY_BYTES: usize = 64 * 1024;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.app_data(
        JsonConfig::default()
            .limit(MAX_JSON_BODY_BYTES)
            .error_handler(json_error_handler),
    )
    .app_data(PathConfig::default().error_handler(path_error_handler))
    .app_data(QueryConfig::default().error_handler(query_error_handler))
    .service(
        scope("/api")
            .configure(diary::configure)
            .configure(visitor::configure)
            .configure(incident::configure)
            .configure(equipment::configure)
            .configure(resource::configure)
            .configure(health::configure),
    );
}
