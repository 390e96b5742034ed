use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use skillport::config::{LoggingSettings, Settings, StorageBackend};
use skillport::core::Matcher;
use skillport::routes::{self, AppState};
use skillport::services::{seed_requests, Catalog, JsonFileBackend, MemoryBackend, RequestStore, SnapshotBackend};
use tracing::{info, warn, error};
use tracing_subscriber::EnvFilter;

/// LOG_LEVEL / LOG_FORMAT take precedence over the config file
fn init_logging(logging: &LoggingSettings) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match log_format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.init(),
    }
}

fn load_catalog(settings: &Settings) -> Catalog {
    match &settings.catalog.path {
        Some(path) => Catalog::from_file(path).unwrap_or_else(|e| {
            warn!("Failed to load catalog from {} ({}), using built-in sample", path, e);
            Catalog::sample()
        }),
        None => Catalog::sample(),
    }
}

fn open_store(settings: &Settings) -> RequestStore {
    let backend: Box<dyn SnapshotBackend> = match settings.storage.backend {
        StorageBackend::File => Box::new(JsonFileBackend::new(&settings.storage.snapshot_path)),
        StorageBackend::Memory => Box::new(MemoryBackend::new()),
    };

    let seed = if settings.storage.seed_requests {
        seed_requests()
    } else {
        Vec::new()
    };

    RequestStore::open(backend, settings.storage.id_strategy.build(), seed)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();
    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default();

    init_logging(&logging);

    info!("Starting SkillPort matchmaking service...");

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!("Configuration loaded successfully");

    let catalog = load_catalog(&settings);
    info!(
        "Catalog ready: {} subjects, {} timeslots, {} people",
        catalog.subjects.len(),
        catalog.timeslots.len(),
        catalog.people.len()
    );

    let store = open_store(&settings);
    info!("Request store ready with {} requests", store.len());

    let weights = settings.scoring_weights();
    let matcher = Matcher::new(weights);

    info!("Matcher initialized with weights: {:?}", weights);

    let app_state = AppState::new(catalog, matcher, store)
        .with_limits(settings.matching.default_limit, settings.matching.max_limit);

    let host = settings.server.host.clone();
    let port = settings.server.port;

    info!("Starting HTTP server on {}:{}", host, port);

    let server = HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .app_data(routes::query_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    });

    let server = match settings.server.workers {
        Some(workers) => server.workers(workers),
        None => server,
    };

    server.bind((host, port))?.run().await
}
