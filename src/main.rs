#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use storefront::{handlers::configure, settings::StorefrontSettings, state::AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load configuration from Settings.toml and environment variables
    // This also loads .env file and initializes the logger
    let settings = StorefrontSettings::load()
        .map_err(|e| std::io::Error::other(format!("Failed to load settings: {e}")))?;

    let state = AppState::from_settings(&settings)
        .map_err(|e| std::io::Error::other(format!("Failed to initialize API client: {e}")))?;

    println!("✓ Using encrypted cookie sessions");
    start_server(state, settings).await
}

/// Start the storefront server
///
/// # Errors
///
/// Returns an error if:
/// - Server binding fails
/// - Server fails to start
async fn start_server(state: AppState, settings: StorefrontSettings) -> std::io::Result<()> {
    let bind_address = settings.get_bind_address();
    print_startup_info(&bind_address, &settings);

    let cors_origins = settings.get_cors_origins();
    let state = web::Data::new(state);

    HttpServer::new(move || {
        let cors_origins = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _| {
                cors_origins
                    .iter()
                    .any(|allowed| allowed == origin.to_str().unwrap_or(""))
            })
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec!["Content-Type", "Accept"])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .configure(configure)
    })
    .bind(&bind_address)?
    .run()
    .await
}

fn print_startup_info(bind_address: &str, settings: &StorefrontSettings) {
    println!("Starting storefront on http://{bind_address}");
    println!("Catalog API: {}", settings.api.base_url);
    println!();
    println!("Pages:");
    println!("  GET  /                 - Role-based entry redirect");
    println!("  GET|POST /login        - Sign in");
    println!("  GET|POST /signup       - Create an account");
    println!("  GET  /admin            - Admin dashboard");
    println!("  POST /admin/categories - Create category");
    println!("  POST /admin/products   - Create product");
    println!("  GET  /customer         - Product catalog");
    println!();
    println!("System endpoints:");
    println!("  GET  /auth/outcome/{{root|admin|customer}} - Guard outcome as JSON");
    println!("  GET  /ping             - Health check");
}
