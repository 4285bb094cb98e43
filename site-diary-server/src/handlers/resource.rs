use site_diary_common::db::{self, DbAsyncPool};
use site_diary_common::request_io::inputs::InputResource;

use actix_web::{web, HttpResponse};
use std::borrow::Cow;

use crate::handlers::error::HttpErrorResponse;

pub async fn get_all(
    db_async_pool: web::Data<DbAsyncPool>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let resource_dao = db::resource::Dao::new(&db_async_pool);
    let catalog = match resource_dao.get_all_resources().await {
        Ok(r) => r,
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(Cow::Borrowed(
                "Failed to load resources",
            )));
        }
    };

    Ok(HttpResponse::Ok().json(catalog))
}

pub async fn create(
    db_async_pool: web::Data<DbAsyncPool>,
    resource_data: web::Json<InputResource>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let fields = resource_data
        .normalize()
        .map_err(|msg| HttpErrorResponse::IncorrectlyFormed(Cow::Owned(msg)))?;

    let resource_dao = db::resource::Dao::new(&db_async_pool);
    let resource = match resource_dao.create_resource(&fields).await {
        Ok(r) => r,
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(Cow::Borrowed(
                "Failed to create resource. Please try again.",
            )));
        }
    };

    Ok(HttpResponse::Created().json(resource))
}
