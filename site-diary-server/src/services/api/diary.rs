use actix_web::web::*;

use crate::handlers::diary;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        resource("/diary")
            .route(get().to(diary::get_all))
            .route(post().to(diary::create)),
    )
    .service(
        resource("/diary/{diary_id}")
            .route(get().to(diary::get))
            .route(put().to(diary::edit)),
    )
    .service(resource("/weather").route(get().to(diary::get_weather_conditions)));
}
