mod api;
mod config;
mod middleware;
mod models;
mod services;
mod store;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Configuration is read exactly once; everything downstream receives it
    // through web::Data
    let config = config::AppConfig::from_env().expect("Invalid configuration");

    log::info!("🚀 Starting Pitch Service...");
    log::info!(
        "🗂 Content store: project {} / dataset {}",
        config.sanity.project_id,
        config.sanity.dataset
    );

    // Initialize the content store client and check connectivity
    let store = store::SanityStore::new(&config.sanity);
    let pitch_count = store
        .ping()
        .await
        .expect("Failed to reach content store");

    log::info!("✅ Content store connected ({} pitches)", pitch_count);

    let host = config.host.clone();
    let port = config.port.clone();
    let frontend_url = config.frontend_url.clone();

    let config_data = web::Data::new(config);
    let store_data = web::Data::new(store);

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!(
        "📚 Swagger UI available at: http://{}:{}/swagger-ui/",
        host,
        port
    );
    log::info!(
        "📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json",
        host,
        port
    );

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&frontend_url)
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://127.0.0.1:3000")
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .supports_credentials()
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(config_data.clone())
            .app_data(store_data.clone())
            .wrap(cors)
            .wrap(middleware::SecurityHeaders)
            .wrap(middleware::SessionMiddleware)
            .wrap(Logger::default())
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            // Health check
            .route("/health", web::get().to(api::health::health_check))
            // Metrics
            .route("/metrics", web::get().to(api::metrics::get_metrics))
            // Auth endpoints (GitHub OAuth + session)
            .service(
                web::scope("/api/v1/auth")
                    .route("/github", web::get().to(api::auth::github_auth))
                    .route("/callback", web::get().to(api::auth::github_callback))
                    .route("/verify", web::get().to(api::auth::verify_token))
                    .route("/me", web::get().to(api::auth::get_me)),
            )
            // Pitches: listing/search, creation, detail (detail visits count views)
            .service(
                web::scope("/api/v1/pitches")
                    .route("", web::get().to(api::pitches::get_pitches))
                    .route("", web::post().to(api::pitches::create_pitch))
                    .route("/{id}", web::get().to(api::pitches::get_pitch)),
            )
            // Authors: profile + their pitches
            .service(
                web::scope("/api/v1/authors")
                    .route("/{id}", web::get().to(api::authors::get_author))
                    .route("/{id}/pitches", web::get().to(api::authors::get_author_pitches)),
            )
            // Playlists: curated picks
            .service(
                web::scope("/api/v1/playlists")
                    .route("/{slug}", web::get().to(api::playlists::get_playlist)),
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
