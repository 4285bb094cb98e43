use site_diary_common::db::{self, DbAsyncPool};
use site_diary_common::request_io::inputs::InputIncident;

use actix_web::{web, HttpResponse};
use std::borrow::Cow;

use crate::handlers::error::{DoesNotExistType, HttpErrorResponse};

pub async fn get_for_diary(
    db_async_pool: web::Data<DbAsyncPool>,
    diary_id: web::Path<i64>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let incident_dao = db::incident::Dao::new(&db_async_pool);
    let incidents = match incident_dao.get_incidents(Some(*diary_id)).await {
        Ok(i) => i,
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(Cow::Borrowed(
                "Failed to fetch incidents",
            )));
        }
    };

    Ok(HttpResponse::Ok().json(incidents))
}

pub async fn create(
    db_async_pool: web::Data<DbAsyncPool>,
    diary_id: web::Path<i64>,
    incident_data: web::Json<InputIncident>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let fields = incident_data
        .normalize()
        .map_err(|msg| HttpErrorResponse::IncorrectlyFormed(Cow::Owned(msg)))?;

    let incident_dao = db::incident::Dao::new(&db_async_pool);
    let incident = match incident_dao.create_incident(*diary_id, &fields).await {
        Ok(i) => i,
        Err(e) if e.is_foreign_key_violation() => {
            return Err(HttpErrorResponse::ForeignKeyDoesNotExist(Cow::Borrowed(
                "No diary entry with that ID",
            )));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(Cow::Borrowed(
                "Failed to save incident. Please try again.",
            )));
        }
    };

    Ok(HttpResponse::Created().json(incident))
}

pub async fn edit(
    db_async_pool: web::Data<DbAsyncPool>,
    incident_id: web::Path<i64>,
    incident_data: web::Json<InputIncident>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let fields = incident_data
        .normalize()
        .map_err(|msg| HttpErrorResponse::IncorrectlyFormed(Cow::Owned(msg)))?;

    let incident_dao = db::incident::Dao::new(&db_async_pool);
    let incident = match incident_dao.update_incident(*incident_id, &fields).await {
        Ok(i) => i,
        Err(e) if e.is_not_found() => {
            return Err(HttpErrorResponse::DoesNotExist(
                Cow::Borrowed("Incident not found"),
                DoesNotExistType::Incident,
            ));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(Cow::Borrowed(
                "Failed to save incident. Please try again.",
            )));
        }
    };

    Ok(HttpResponse::Ok().json(incident))
}

pub async fn delete(
    db_async_pool: web::Data<DbAsyncPool>,
    incident_id: web::Path<i64>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let incident_dao = db::incident::Dao::new(&db_async_pool);
    match incident_dao.delete_incident(*incident_id).await {
        Ok(_) => (),
        Err(e) if e.is_not_found() => {
            return Err(HttpErrorResponse::DoesNotExist(
                Cow::Borrowed("Incident not found"),
                DoesNotExistType::Incident,
            ));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(Cow::Borrowed(
                "Failed to delete incident. Please try again.",
            )));
        }
    }

    Ok(HttpResponse::NoContent().finish())
}
