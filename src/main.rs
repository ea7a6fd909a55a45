//! Salary Predictor HTTP Server
//!
//! Standalone HTTP server for the salary prediction service

#[cfg(feature = "http-server")]
use salary_predictor::{Config, Result};

#[cfg(feature = "http-server")]
#[actix_rt::main]
async fn main() -> Result<()> {
    // Initialize logger
    salary_predictor::init()?;

    log::info!("Starting Salary Predictor HTTP Server...");

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("SALARY_API_CONFIG").ok());
    let mut config = match config_path {
        Some(path) => {
            log::info!("Loading configuration from {}", path);
            Config::from_file(&path)?
        }
        None => Config::default(),
    };
    config.apply_env_overrides()?;
    config.validate()?;

    log::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    // Load model and scaler
    let api_state = salary_predictor::api::ApiServerState::from_config(&config);
    if !api_state.is_model_ready() {
        log::warn!("Model not loaded; /predict will return 503 until /reload-model succeeds");
    }

    // Start HTTP server
    use actix_web::{middleware, web, App, HttpServer};

    let host = config.server.host.clone();
    let port = config.server.port;
    let workers = config.server.workers;
    let state = web::Data::new(api_state);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(salary_predictor::api::configure_routes)
    })
    .workers(workers)
    .bind((host.as_str(), port))?
    .run()
    .await?;

    log::info!("Server stopped.");

    Ok(())
}

#[cfg(not(feature = "http-server"))]
fn main() {
    eprintln!("HTTP server feature is not enabled.");
    eprintln!("Please compile with: cargo build --features http-server");
    std::process::exit(1);
}
