use site_diary_common::db::create_db_async_pool;

use actix_web::web::Data;
use actix_web::{App, HttpServer};
use flexi_logger::{Age, Cleanup, Criterion, Duplicate, FileSpec, Logger, Naming, WriteMode};

mod env;
mod handlers;
mod services;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let mut port = 9000u16;

    let mut args = std::env::args();

    // Eat the first argument, which is the relative path to the executable
    args.next();

    while let Some(arg) = args.next() {
        match arg.to_lowercase().as_str() {
            "--port" => {
                let Some(port_str) = args.next() else {
                    eprintln!("ERROR: --port option specified but no port was given");
                    std::process::exit(1);
                };

                port = match port_str.parse::<u16>() {
                    Ok(p) => p,
                    Err(_) => {
                        eprintln!("ERROR: Incorrect format for port. Integer expected");
                        std::process::exit(1);
                    }
                };
            }
            a => {
                eprintln!("ERROR: Invalid argument: {}", &a);
                std::process::exit(1);
            }
        }
    }

    // Surface configuration problems before anything touches the lazily loaded config
    if let Err(e) = env::Config::from_env() {
        eprintln!("ERROR: {e}");
        std::process::exit(1);
    }

    let logger = match Logger::try_with_str(&env::CONF.log_level) {
        Ok(l) => l,
        Err(e) => {
            eprintln!(
                "ERROR: Invalid log level ({e}). Options: ERROR, WARN, INFO, DEBUG, TRACE. \
                 Example: `info, site_diary_server::handlers=debug`"
            );
            std::process::exit(1);
        }
    };

    let _logger = match logger
        .log_to_file(FileSpec::default().directory("./logs"))
        .rotate(
            Criterion::Age(Age::Day),
            Naming::Timestamps,
            Cleanup::KeepLogAndCompressedFiles(60, 365),
        )
        .cleanup_in_background_thread(true)
        .duplicate_to_stdout(Duplicate::All)
        .write_mode(WriteMode::Async)
        .format(|writer, now, record| {
            write!(
                writer,
                "{:5} | {} | {}:{} | {}",
                record.level(),
                now.format("%Y-%m-%dT%H:%M:%S%.6fZ"),
                record.module_path().unwrap_or("<unknown>"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .use_utc()
        .start()
    {
        Ok(h) => h,
        Err(e) => {
            eprintln!("ERROR: Failed to start logger: {e}");
            std::process::exit(1);
        }
    };

    let actix_workers = env::CONF.actix_worker_count;

    // Max connections must be at least as large as the number of actix workers to prevent
    // resource starvation
    let db_max_connections = env::CONF
        .db_max_connections
        .max(actix_workers.try_into().unwrap_or(u32::MAX));

    log::info!("Connecting to database...");

    let db_async_pool = match create_db_async_pool(
        &env::CONF.database_uri(),
        db_max_connections,
        env::CONF.db_idle_timeout,
    )
    .await
    {
        Ok(p) => p,
        Err(e) => {
            log::error!("{e}");
            eprintln!("ERROR: Failed to connect to database");
            std::process::exit(1);
        }
    };

    log::info!("Successfully connected to database");

    let base_addr = format!("127.0.0.1:{}", &port);
    log::info!("Listening on {base_addr}");

    HttpServer::new(move || {
        App::new()
            .app_data(Data::new(db_async_pool.clone()))
            .configure(services::api::configure)
            .wrap(actix_web::middleware::Logger::default())
    })
    .workers(actix_workers)
    .bind(base_addr)?
    .run()
    .await?;

    unsafe {
        env::CONF.zeroize();
    }

    Ok(())
}
