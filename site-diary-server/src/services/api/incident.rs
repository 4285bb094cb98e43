use actix_web::web::*;

use crate::handlers::incident;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        resource("/diary/{diary_id}/incidents")
            .route(get().to(incident::get_for_diary))
            .route(post().to(incident::create)),
    )
    .service(
        resource("/incident/{incident_id}")
            .route(put().to(incident::edit))
            .route(delete().to(incident::delete)),
    );
}
