use site_diary_common::db::{self, DaoError, DbAsyncPool};
use site_diary_common::request_io::inputs::{InputResourceQuery, InputUtilization};
use site_diary_common::request_io::outputs::OutputResourceOptions;
use site_diary_common::resource_picker::{self, UsedResourceIds};

use actix_web::{web, HttpResponse};
use std::borrow::Cow;

use crate::handlers::error::{DoesNotExistType, HttpErrorResponse};

pub const ALREADY_ADDED_MSG: &str = "This resource has already been added to this diary entry.";
const SAVE_FAILED_MSG: &str = "Failed to save resource entry. Please try again.";

/// Fails with `InvalidState` when `resource_id` is already attached to the diary entry by a row
/// other than `editing_id`.
async fn ensure_resource_not_attached(
    utilization_dao: &db::resource_utilization::Dao,
    diary_id: i64,
    resource_id: i64,
    editing_id: Option<i64>,
) -> Result<(), HttpErrorResponse> {
    let attached = match utilization_dao
        .get_utilizations_with_resource_for_diary(diary_id)
        .await
    {
        Ok(a) => a,
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(Cow::Borrowed(
                SAVE_FAILED_MSG,
            )));
        }
    };

    if UsedResourceIds::new(&attached, editing_id).contains(resource_id) {
        return Err(HttpErrorResponse::InvalidState(Cow::Borrowed(
            ALREADY_ADDED_MSG,
        )));
    }

    Ok(())
}

fn map_save_error(e: DaoError) -> HttpErrorResponse {
    if e.is_foreign_key_violation() {
        // Postgres names the constraint after the referencing column
        if e.constraint_name().is_some_and(|c| c.contains("resource_id")) {
            return HttpErrorResponse::DoesNotExist(
                Cow::Borrowed("Resource not found"),
                DoesNotExistType::Resource,
            );
        }

        return HttpErrorResponse::ForeignKeyDoesNotExist(Cow::Borrowed(
            "No diary entry with that ID",
        ));
    }

    log::error!("{e}");
    HttpErrorResponse::InternalError(Cow::Borrowed(SAVE_FAILED_MSG))
}

pub async fn get_for_diary(
    db_async_pool: web::Data<DbAsyncPool>,
    diary_id: web::Path<i64>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let utilization_dao = db::resource_utilization::Dao::new(&db_async_pool);
    let equipment = match utilization_dao
        .get_utilizations_with_resource_for_diary(*diary_id)
        .await
    {
        Ok(e) => e,
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(Cow::Borrowed(
                "Failed to fetch equipment",
            )));
        }
    };

    Ok(HttpResponse::Ok().json(equipment))
}

pub async fn get_resource_options(
    db_async_pool: web::Data<DbAsyncPool>,
    diary_id: web::Path<i64>,
    query: web::Query<InputResourceQuery>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let resource_dao = db::resource::Dao::new(&db_async_pool);
    let utilization_dao = db::resource_utilization::Dao::new(&db_async_pool);

    let (catalog, attached) = futures::join!(
        resource_dao.get_all_resources(),
        utilization_dao.get_utilizations_with_resource_for_diary(*diary_id),
    );

    let (catalog, attached) = match (catalog, attached) {
        (Ok(c), Ok(a)) => (c, a),
        (Err(e), _) | (_, Err(e)) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(Cow::Borrowed(
                "Failed to load resources",
            )));
        }
    };

    let search = query.q.as_deref().unwrap_or("");
    let used = UsedResourceIds::new(&attached, query.editing);

    Ok(HttpResponse::Ok().json(OutputResourceOptions {
        options: resource_picker::resource_options(&catalog, search, &used),
        can_create: resource_picker::can_create_from_query(&catalog, search),
    }))
}

pub async fn create(
    db_async_pool: web::Data<DbAsyncPool>,
    diary_id: web::Path<i64>,
    utilization_data: web::Json<InputUtilization>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let fields = utilization_data
        .normalize()
        .map_err(|msg| HttpErrorResponse::IncorrectlyFormed(Cow::Owned(msg)))?;

    let utilization_dao = db::resource_utilization::Dao::new(&db_async_pool);
    ensure_resource_not_attached(&utilization_dao, *diary_id, fields.resource_id, None).await?;

    let utilization = utilization_dao
        .create_utilization(*diary_id, fields.resource_id, fields.value)
        .await
        .map_err(map_save_error)?;

    Ok(HttpResponse::Created().json(utilization))
}

pub async fn edit(
    db_async_pool: web::Data<DbAsyncPool>,
    utilization_id: web::Path<i64>,
    utilization_data: web::Json<InputUtilization>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let fields = utilization_data
        .normalize()
        .map_err(|msg| HttpErrorResponse::IncorrectlyFormed(Cow::Owned(msg)))?;

    let utilization_dao = db::resource_utilization::Dao::new(&db_async_pool);
    let existing = match utilization_dao.get_utilization(*utilization_id).await {
        Ok(u) => u,
        Err(e) if e.is_not_found() => {
            return Err(HttpErrorResponse::DoesNotExist(
                Cow::Borrowed("Resource entry not found"),
                DoesNotExistType::Utilization,
            ));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(Cow::Borrowed(
                SAVE_FAILED_MSG,
            )));
        }
    };

    ensure_resource_not_attached(
        &utilization_dao,
        existing.site_diary_id,
        fields.resource_id,
        Some(existing.id),
    )
    .await?;

    let utilization = match utilization_dao
        .update_utilization(existing.id, fields.resource_id, fields.value)
        .await
    {
        Ok(u) => u,
        Err(e) if e.is_not_found() => {
            return Err(HttpErrorResponse::DoesNotExist(
                Cow::Borrowed("Resource entry not found"),
                DoesNotExistType::Utilization,
            ));
        }
        Err(e) => return Err(map_save_error(e)),
    };

    Ok(HttpResponse::Ok().json(utilization))
}

pub async fn delete(
    db_async_pool: web::Data<DbAsyncPool>,
    utilization_id: web::Path<i64>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let utilization_dao = db::resource_utilization::Dao::new(&db_async_pool);
    match utilization_dao.delete_utilization(*utilization_id).await {
        Ok(_) => (),
        Err(e) if e.is_not_found() => {
            return Err(HttpErrorResponse::DoesNotExist(
                Cow::Borrowed("Resource entry not found"),
                DoesNotExistType::Utilization,
            ));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(Cow::Borrowed(
                "Failed to delete resource entry. Please try again.",
            )));
        }
    }

    Ok(HttpResponse::NoContent().finish())
}
