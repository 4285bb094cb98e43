use site_diary_common::db::{self, DbAsyncPool};
use site_diary_common::request_io::inputs::InputVisitor;

use actix_web::{web, HttpResponse};
use std::borrow::Cow;

use crate::handlers::error::{DoesNotExistType, HttpErrorResponse};

pub const DUPLICATE_VISITOR_MSG: &str =
    "A visitor with this name already exists for this diary entry.";
const SAVE_FAILED_MSG: &str = "Failed to save visitor. Please try again.";

pub async fn get_for_diary(
    db_async_pool: web::Data<DbAsyncPool>,
    diary_id: web::Path<i64>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let visitor_dao = db::visitor::Dao::new(&db_async_pool);
    let visitors = match visitor_dao.get_visitors(Some(*diary_id)).await {
        Ok(v) => v,
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(Cow::Borrowed(
                "Failed to fetch visitors",
            )));
        }
    };

    Ok(HttpResponse::Ok().json(visitors))
}

pub async fn create(
    db_async_pool: web::Data<DbAsyncPool>,
    diary_id: web::Path<i64>,
    visitor_data: web::Json<InputVisitor>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let fields = visitor_data
        .normalize()
        .map_err(|msg| HttpErrorResponse::IncorrectlyFormed(Cow::Owned(msg)))?;

    let visitor_dao = db::visitor::Dao::new(&db_async_pool);
    let visitor = match visitor_dao.create_visitor(*diary_id, &fields).await {
        Ok(v) => v,
        Err(e) if e.is_unique_violation() => {
            return Err(HttpErrorResponse::ConflictWithExisting(Cow::Borrowed(
                DUPLICATE_VISITOR_MSG,
            )));
        }
        Err(e) if e.is_foreign_key_violation() => {
            return Err(HttpErrorResponse::ForeignKeyDoesNotExist(Cow::Borrowed(
                "No diary entry with that ID",
            )));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(Cow::Borrowed(
                SAVE_FAILED_MSG,
            )));
        }
    };

    Ok(HttpResponse::Created().json(visitor))
}

pub async fn edit(
    db_async_pool: web::Data<DbAsyncPool>,
    visitor_id: web::Path<i64>,
    visitor_data: web::Json<InputVisitor>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let fields = visitor_data
        .normalize()
        .map_err(|msg| HttpErrorResponse::IncorrectlyFormed(Cow::Owned(msg)))?;

    let visitor_dao = db::visitor::Dao::new(&db_async_pool);
    let visitor = match visitor_dao.update_visitor(*visitor_id, &fields).await {
        Ok(v) => v,
        Err(e) if e.is_not_found() => {
            return Err(HttpErrorResponse::DoesNotExist(
                Cow::Borrowed("Visitor not found"),
                DoesNotExistType::Visitor,
            ));
        }
        Err(e) if e.is_unique_violation() => {
            return Err(HttpErrorResponse::ConflictWithExisting(Cow::Borrowed(
                DUPLICATE_VISITOR_MSG,
            )));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(Cow::Borrowed(
                SAVE_FAILED_MSG,
            )));
        }
    };

    Ok(HttpResponse::Ok().json(visitor))
}

pub async fn delete(
    db_async_pool: web::Data<DbAsyncPool>,
    visitor_id: web::Path<i64>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let visitor_dao = db::visitor::Dao::new(&db_async_pool);
    match visitor_dao.delete_visitor(*visitor_id).await {
        Ok(_) => (),
        Err(e) if e.is_not_found() => {
            return Err(HttpErrorResponse::DoesNotExist(
                Cow::Borrowed("Visitor not found"),
                DoesNotExistType::Visitor,
            ));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(Cow::Borrowed(
                "Failed to delete visitor. Please try again.",
            )));
        }
    }

    Ok(HttpResponse::NoContent().finish())
}
