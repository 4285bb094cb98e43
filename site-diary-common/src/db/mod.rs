use diesel::result::DatabaseErrorKind;
use diesel_async::pooled_connection::bb8::Pool as AsyncPool;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;
use std::fmt;
use std::time::Duration;

pub mod diary;
pub mod incident;
pub mod resource;
pub mod resource_utilization;
pub mod visitor;

pub type DbAsyncPool = AsyncPool<AsyncPgConnection>;
pub type DbAsyncConnection =
    bb8::PooledConnection<'static, AsyncDieselConnectionManager<AsyncPgConnection>>;

pub async fn create_db_async_pool(
    database_uri: &str,
    max_db_connections: u32,
    idle_timeout: Duration,
) -> Result<DbAsyncPool, DaoError> {
    let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_uri);
    AsyncPool::builder()
        .max_size(max_db_connections)
        .idle_timeout(Some(idle_timeout))
        .build(config)
        .await
        .map_err(|e| DaoError::DbAsyncPoolFailure(e.to_string()))
}

/// Builds a pool without opening any connections up front. Connections are established the
/// first time a DAO asks for one.
pub fn create_lazy_db_async_pool(database_uri: &str, max_db_connections: u32) -> DbAsyncPool {
    let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_uri);
    AsyncPool::builder()
        .max_size(max_db_connections)
        .connection_timeout(Duration::from_secs(10))
        .build_unchecked(config)
}

#[derive(Debug)]
pub enum DaoError {
    DbAsyncPoolFailure(String),
    QueryFailure(diesel::result::Error),
    CannotRunQuery(&'static str),
}

impl DaoError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DaoError::QueryFailure(diesel::result::Error::NotFound))
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            DaoError::QueryFailure(diesel::result::Error::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                _,
            ))
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            DaoError::QueryFailure(diesel::result::Error::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation,
                _,
            ))
        )
    }

    /// Name of the constraint the store reported, when the failure was a constraint violation.
    pub fn constraint_name(&self) -> Option<&str> {
        match self {
            DaoError::QueryFailure(diesel::result::Error::DatabaseError(_, info)) => {
                info.constraint_name()
            }
            _ => None,
        }
    }
}

impl std::error::Error for DaoError {}

impl fmt::Display for DaoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaoError::DbAsyncPoolFailure(e) => {
                write!(f, "DaoError: Failed to obtain async DB connection: {e}")
            }
            DaoError::QueryFailure(e) => {
                write!(f, "DaoError: Query failed: {e}")
            }
            DaoError::CannotRunQuery(msg) => {
                write!(f, "DaoError: Cannot run query: {msg}")
            }
        }
    }
}

impl<E: std::error::Error + Send + Sync + 'static> From<bb8::RunError<E>> for DaoError {
    fn from(error: bb8::RunError<E>) -> Self {
        DaoError::DbAsyncPoolFailure(error.to_string())
    }
}

impl From<diesel::result::Error> for DaoError {
    fn from(error: diesel::result::Error) -> Self {
        DaoError::QueryFailure(error)
    }
}

#[cfg(test)]
pub mod test_utils {
    use chrono::{Days, NaiveDate};
    use diesel::{dsl, ExpressionMethods, QueryDsl};
    use diesel_async::RunQueryDsl;
    use once_cell::sync::Lazy;
    use std::sync::atomic::{AtomicU64, Ordering};

    use crate::db::{create_lazy_db_async_pool, DbAsyncConnection, DbAsyncPool};
    use crate::models::site_diary::{NewSiteDiary, SiteDiary};
    use crate::schema::incidents as incident_fields;
    use crate::schema::incidents::dsl::incidents;
    use crate::schema::resource_utilization as resource_utilization_fields;
    use crate::schema::resource_utilization::dsl::resource_utilization;
    use crate::schema::site_diaries::dsl::site_diaries;
    use crate::schema::visitors as visitor_fields;
    use crate::schema::visitors::dsl::visitors;
    use crate::weather::WeatherCondition;

    const DB_USERNAME_VAR: &str = "SITE_DIARY_DB_USERNAME";
    const DB_PASSWORD_VAR: &str = "SITE_DIARY_DB_PASSWORD";
    const DB_HOSTNAME_VAR: &str = "SITE_DIARY_DB_HOSTNAME";
    const DB_PORT_VAR: &str = "SITE_DIARY_DB_PORT";
    const DB_NAME_VAR: &str = "SITE_DIARY_DB_NAME";
    const DB_MAX_CONNECTIONS_VAR: &str = "SITE_DIARY_DB_MAX_CONNECTIONS";

    pub static DB_ASYNC_POOL: Lazy<DbAsyncPool> = Lazy::new(|| {
        let username = env_or_panic(DB_USERNAME_VAR);
        let password = env_or_panic(DB_PASSWORD_VAR);
        let hostname = env_or_panic(DB_HOSTNAME_VAR);
        let port = env_or_panic(DB_PORT_VAR);
        let db_name = env_or_panic(DB_NAME_VAR);

        let max_connections = env_or_parse(DB_MAX_CONNECTIONS_VAR, 48u32);

        let db_uri = format!(
            "postgres://{}:{}@{}:{}/{}",
            username, password, hostname, port, db_name
        );

        create_lazy_db_async_pool(&db_uri, max_connections)
    });

    pub fn db_async_pool() -> &'static DbAsyncPool {
        &DB_ASYNC_POOL
    }

    pub async fn db_async_conn() -> DbAsyncConnection {
        DB_ASYNC_POOL
            .get()
            .await
            .expect("Failed to obtain pooled DB connection for tests")
    }

    static DATE_COUNTER: AtomicU64 = AtomicU64::new(0);

    /// Dates are unique per diary, so each test diary gets its own day far in the past where
    /// real entries won't collide with it.
    pub fn unique_past_date() -> NaiveDate {
        let offset = DATE_COUNTER.fetch_add(1, Ordering::Relaxed);
        let seed = std::process::id() as u64 * 1000 + offset;

        NaiveDate::from_ymd_opt(1900, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(seed % 36_000))
            .unwrap()
    }

    pub async fn insert_diary(conn: &mut DbAsyncConnection) -> SiteDiary {
        let new_diary = NewSiteDiary {
            date: unique_past_date(),
            description: "Poured footings on the east wing",
            weather: WeatherCondition::Sunny,
            temperature: Some(21.5),
        };

        dsl::insert_into(site_diaries)
            .values(&new_diary)
            .get_result(conn)
            .await
            .expect("Failed to insert diary")
    }

    pub async fn delete_diary(diary_id: i64) {
        if let Ok(mut conn) = db_async_pool().get().await {
            let _ = diesel::delete(visitors.filter(visitor_fields::site_diary_id.eq(diary_id)))
                .execute(&mut conn)
                .await;
            let _ = diesel::delete(
                resource_utilization
                    .filter(resource_utilization_fields::site_diary_id.eq(diary_id)),
            )
            .execute(&mut conn)
            .await;
            let _ = diesel::delete(incidents.filter(incident_fields::site_diary_id.eq(diary_id)))
                .execute(&mut conn)
                .await;
            let _ = diesel::delete(site_diaries.find(diary_id))
                .execute(&mut conn)
                .await;
        }
    }

    fn env_or_panic(key: &str) -> String {
        std::env::var(key).unwrap_or_else(|_| panic!("Environment variable {key} must be set"))
    }

    fn env_or_parse<T>(key: &str, default: T) -> T
    where
        T: std::str::FromStr,
    {
        std::env::var(key)
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or(default)
    }
}
