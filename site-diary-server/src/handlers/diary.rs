use site_diary_common::cards;
use site_diary_common::db::{self, DbAsyncPool};
use site_diary_common::fetch::{self, DiaryData, FetchResult};
use site_diary_common::request_io::inputs::InputSiteDiary;
use site_diary_common::request_io::outputs::{DiaryDetail, OutputWeatherCondition};
use site_diary_common::weather::WeatherCondition;

use actix_web::{web, HttpResponse};
use chrono::Utc;
use std::borrow::Cow;

use crate::handlers::error::{DoesNotExistType, HttpErrorResponse};

pub const DUPLICATE_DATE_MSG: &str =
    "A diary entry already exists for this date. Please edit the existing entry instead.";

fn warn_if_failed<T>(branch: &str, result: &FetchResult<T>) {
    if let Some(e) = &result.error {
        log::warn!("Treating {branch} as empty after failed read: {e}");
    }
}

fn warn_on_child_failures(data: &DiaryData) {
    warn_if_failed("visitors", &data.visitors);
    warn_if_failed("resource utilization", &data.resource_utilization);
    warn_if_failed("incidents", &data.incidents);
}

pub async fn get_all(
    db_async_pool: web::Data<DbAsyncPool>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let data = fetch::fetch_diary_data(&db_async_pool, None).await;

    if let Some(e) = &data.diaries.error {
        log::error!("{e}");
        return Err(HttpErrorResponse::InternalError(Cow::Borrowed(
            "Error loading diary entries. Please try again later.",
        )));
    }

    warn_on_child_failures(&data);

    Ok(HttpResponse::Ok().json(cards::build_diary_cards(&data)))
}

pub async fn get(
    db_async_pool: web::Data<DbAsyncPool>,
    diary_id: web::Path<i64>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let data = fetch::fetch_diary_data(&db_async_pool, Some(*diary_id)).await;

    if let Some(e) = &data.diaries.error {
        log::error!("{e}");
        return Err(HttpErrorResponse::InternalError(Cow::Borrowed(
            "Failed to fetch diary entry",
        )));
    }

    warn_on_child_failures(&data);

    let DiaryData {
        diaries,
        visitors,
        resource_utilization,
        incidents,
    } = data;

    let Some(diary) = diaries.rows.into_iter().next() else {
        return Err(HttpErrorResponse::DoesNotExist(
            Cow::Borrowed("Diary entry not found"),
            DoesNotExistType::Diary,
        ));
    };

    Ok(HttpResponse::Ok().json(DiaryDetail::new(
        diary,
        visitors.rows,
        resource_utilization.rows,
        incidents.rows,
    )))
}

pub async fn create(
    db_async_pool: web::Data<DbAsyncPool>,
    diary_data: web::Json<InputSiteDiary>,
) -> Result<HttpResponse, HttpErrorResponse> {
    const FAILED_MSG: &str = "Failed to create diary entry. Please try again.";

    let fields = diary_data
        .normalize(Utc::now().date_naive())
        .map_err(|msg| HttpErrorResponse::IncorrectlyFormed(Cow::Owned(msg)))?;

    let diary_dao = db::diary::Dao::new(&db_async_pool);

    match diary_dao.get_diary_id_by_date(fields.date).await {
        Ok(Some(_)) => {
            return Err(HttpErrorResponse::ConflictWithExisting(Cow::Borrowed(
                DUPLICATE_DATE_MSG,
            )));
        }
        Ok(None) => (),
        Err(e) => log::warn!("Duplicate-date lookup failed, relying on insert: {e}"),
    }

    // The lookup above can fail or race with another insert for the same day, so the unique
    // constraint is still checked here
    let diary = match diary_dao
        .create_diary(
            fields.date,
            &fields.description,
            fields.weather,
            fields.temperature,
        )
        .await
    {
        Ok(d) => d,
        Err(e) if e.is_unique_violation() => {
            return Err(HttpErrorResponse::ConflictWithExisting(Cow::Borrowed(
                DUPLICATE_DATE_MSG,
            )));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(Cow::Borrowed(FAILED_MSG)));
        }
    };

    Ok(HttpResponse::Created().json(diary))
}

pub async fn edit(
    db_async_pool: web::Data<DbAsyncPool>,
    diary_id: web::Path<i64>,
    diary_data: web::Json<InputSiteDiary>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let fields = diary_data
        .normalize(Utc::now().date_naive())
        .map_err(|msg| HttpErrorResponse::IncorrectlyFormed(Cow::Owned(msg)))?;

    let diary_dao = db::diary::Dao::new(&db_async_pool);
    let diary = match diary_dao
        .update_diary(
            *diary_id,
            fields.date,
            &fields.description,
            fields.weather,
            fields.temperature,
        )
        .await
    {
        Ok(d) => d,
        Err(e) if e.is_not_found() => {
            return Err(HttpErrorResponse::DoesNotExist(
                Cow::Borrowed("Diary entry not found"),
                DoesNotExistType::Diary,
            ));
        }
        Err(e) if e.is_unique_violation() => {
            return Err(HttpErrorResponse::ConflictWithExisting(Cow::Borrowed(
                DUPLICATE_DATE_MSG,
            )));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(Cow::Borrowed(
                "Failed to save changes. Please try again.",
            )));
        }
    };

    Ok(HttpResponse::Ok().json(diary))
}

pub async fn get_weather_conditions() -> HttpResponse {
    let conditions: Vec<OutputWeatherCondition> = WeatherCondition::ALL
        .into_iter()
        .map(OutputWeatherCondition::from)
        .collect();

    HttpResponse::Ok().json(conditions)
}
