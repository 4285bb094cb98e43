use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use site_diary_common::db::DbAsyncPool;

use crate::env;

#[derive(Deserialize)]
pub struct HealthKeyQuery {
    pub key: Option<String>,
}

pub async fn heartbeat() -> impl Responder {
    HttpResponse::Ok()
}

pub async fn health(
    db_async_pool: web::Data<DbAsyncPool>,
    query: web::Query<HealthKeyQuery>,
) -> impl Responder {
    let Some(key) = query.key.as_deref() else {
        return HttpResponse::Unauthorized().finish();
    };

    if !keys_match(key.as_bytes(), env::CONF.health_endpoint_key.as_bytes()) {
        return HttpResponse::Unauthorized().finish();
    }

    let async_pool_state = db_async_pool.state();
    let resp_body = json!({
        "db_async_pool_state": {
            "connections": async_pool_state.connections,
            "idle_connections": async_pool_state.idle_connections
        }
    });

    HttpResponse::Ok().json(resp_body)
}

#[inline]
fn keys_match(key: &[u8], correct_key: &[u8]) -> bool {
    if correct_key.len() != key.len() || key.is_empty() {
        return false;
    }

    // Bitwise comparison over every byte so the time taken doesn't depend on where a mismatch is
    let mut keys_dont_match = 0u8;
    for (correct_key_byte, key_byte) in correct_key.iter().zip(key.iter()) {
        keys_dont_match |= correct_key_byte ^ key_byte;
    }

    keys_dont_match == 0
}
