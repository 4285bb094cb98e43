use crate::db::{self, DaoError, DbAsyncPool};
use crate::models::incident::Incident;
use crate::models::resource_utilization::ResourceUtilizationWithResource;
use crate::models::site_diary::SiteDiary;
use crate::models::visitor::Visitor;

/// Outcome of one read. A failed read carries no rows, only the error.
#[derive(Debug)]
pub struct FetchResult<T> {
    pub rows: Vec<T>,
    pub error: Option<DaoError>,
}

impl<T> FetchResult<T> {
    pub fn ok(rows: Vec<T>) -> Self {
        Self { rows, error: None }
    }

    pub fn failed(error: DaoError) -> Self {
        Self {
            rows: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

impl<T> From<Result<Vec<T>, DaoError>> for FetchResult<T> {
    fn from(result: Result<Vec<T>, DaoError>) -> Self {
        match result {
            Ok(rows) => FetchResult::ok(rows),
            Err(e) => FetchResult::failed(e),
        }
    }
}

#[derive(Debug)]
pub struct DiaryData {
    pub diaries: FetchResult<SiteDiary>,
    pub visitors: FetchResult<Visitor>,
    pub resource_utilization: FetchResult<ResourceUtilizationWithResource>,
    pub incidents: FetchResult<Incident>,
}

/// Reads diary entries and their children, all four collections at once. Each read gets its own
/// pooled connection and a failure in one does not cancel the others.
///
/// With `diary_id` set, every collection is limited to that entry and utilizations come back
/// joined with their resource.
pub async fn fetch_diary_data(db_async_pool: &DbAsyncPool, diary_id: Option<i64>) -> DiaryData {
    let diary_dao = db::diary::Dao::new(db_async_pool);
    let visitor_dao = db::visitor::Dao::new(db_async_pool);
    let utilization_dao = db::resource_utilization::Dao::new(db_async_pool);
    let incident_dao = db::incident::Dao::new(db_async_pool);

    let diaries_fut = async {
        match diary_id {
            Some(id) => diary_dao.get_diaries_by_id(id).await,
            None => diary_dao.get_all_diaries().await,
        }
    };

    let (diaries, visitors, resource_utilization, incidents) = futures::join!(
        diaries_fut,
        visitor_dao.get_visitors(diary_id),
        utilization_dao.get_utilizations(diary_id),
        incident_dao.get_incidents(diary_id),
    );

    DiaryData {
        diaries: diaries.into(),
        visitors: visitors.into(),
        resource_utilization: resource_utilization.into(),
        incidents: incidents.into(),
    }
}
