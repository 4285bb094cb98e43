use actix_web::web::*;

use crate::handlers::equipment;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        resource("/diary/{diary_id}/equipment")
            .route(get().to(equipment::get_for_diary))
            .route(post().to(equipment::create)),
    )
    .service(
        resource("/diary/{diary_id}/equipment/options")
            .route(get().to(equipment::get_resource_options)),
    )
    .service(
        resource("/equipment/{utilization_id}")
            .route(put().to(equipment::edit))
            .route(delete().to(equipment::delete)),
    );
}
