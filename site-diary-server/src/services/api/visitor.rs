use actix_web::web::*;

use crate::handlers::visitor;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        resource("/diary/{diary_id}/visitors")
            .route(get().to(visitor::get_for_diary))
            .route(post().to(visitor::create)),
    )
    .service(
        resource("/visitor/{visitor_id}")
            .route(put().to(visitor::edit))
            .route(delete().to(visitor::delete)),
    );
}
