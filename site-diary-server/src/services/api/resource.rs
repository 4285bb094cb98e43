use actix_web::web::*;

use crate::handlers::resource as resource_handlers;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        resource("/resource")
            .route(get().to(resource_handlers::get_all))
            .route(post().to(resource_handlers::create)),
    );
}
