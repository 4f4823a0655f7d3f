use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use facture::config::Config;
use facture::middleware::{RequestId, SessionAuth};
use facture::modules::auth::controllers::auth_controller;
use facture::modules::auth::repositories::{MySqlSessionRepository, MySqlUserRepository};
use facture::modules::auth::services::AuthService;
use facture::modules::clients::controllers::client_controller;
use facture::modules::clients::repositories::MySqlClientRepository;
use facture::modules::clients::services::ClientService;
use facture::modules::estimates::controllers::estimate_controller;
use facture::modules::estimates::repositories::MySqlEstimateRepository;
use facture::modules::estimates::services::EstimateService;
use facture::modules::health::controllers::health_controller;
use facture::modules::invoices::controllers::invoice_controller;
use facture::modules::invoices::repositories::MySqlInvoiceRepository;
use facture::modules::invoices::services::InvoiceService;
use facture::modules::products::controllers::product_controller;
use facture::modules::products::repositories::MySqlProductRepository;
use facture::modules::products::services::ProductService;
use facture::modules::profiles::controllers::profile_controller;
use facture::modules::profiles::repositories::MySqlProfileRepository;
use facture::modules::profiles::services::ProfileService;
use facture::modules::recurring::controllers::recurring_controller;
use facture::modules::recurring::repositories::MySqlRecurringInvoiceRepository;
use facture::modules::recurring::services::RecurringInvoiceService;
use facture::modules::reports::controllers::report_controller;
use facture::modules::reports::repositories::MySqlReportRepository;
use facture::modules::reports::services::ReportService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "facture=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    tracing::info!("Starting Facture Invoicing API");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool
    let db_pool = config
        .database
        .create_pool()
        .await
        .expect("Failed to create database pool");

    tracing::info!(
        "Database pool initialized (max {} connections)",
        config.database.max_connections
    );

    // Repositories
    let users = Arc::new(MySqlUserRepository::new(db_pool.clone()));
    let sessions = Arc::new(MySqlSessionRepository::new(db_pool.clone()));
    let clients = Arc::new(MySqlClientRepository::new(db_pool.clone()));
    let products = Arc::new(MySqlProductRepository::new(db_pool.clone()));
    let invoices = Arc::new(MySqlInvoiceRepository::new(db_pool.clone()));
    let estimates = Arc::new(MySqlEstimateRepository::new(db_pool.clone()));
    let recurring = Arc::new(MySqlRecurringInvoiceRepository::new(db_pool.clone()));
    let profiles = Arc::new(MySqlProfileRepository::new(db_pool.clone()));
    let reports = Arc::new(MySqlReportRepository::new(db_pool.clone()));

    // Services, shared across workers
    let auth_service = web::Data::new(Arc::new(AuthService::new(
        users,
        sessions,
        config.security.session_ttl_hours,
    )));
    let client_service = web::Data::new(Arc::new(ClientService::new(
        clients.clone(),
        invoices.clone(),
        estimates.clone(),
        recurring.clone(),
    )));
    let product_service = web::Data::new(Arc::new(ProductService::new(products)));
    let invoice_service = web::Data::new(Arc::new(InvoiceService::new(
        invoices,
        clients.clone(),
        profiles.clone(),
    )));
    let estimate_service = web::Data::new(Arc::new(EstimateService::new(
        estimates,
        clients.clone(),
    )));
    let recurring_service = web::Data::new(Arc::new(RecurringInvoiceService::new(
        recurring, clients,
    )));
    let profile_service = web::Data::new(Arc::new(ProfileService::new(profiles)));
    let report_service = web::Data::new(Arc::new(ReportService::new(reports)));

    let auth_routes = auth_controller::configure(config.security.login_rate_limit_per_minute);

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(auth_service.clone())
            .app_data(client_service.clone())
            .app_data(product_service.clone())
            .app_data(invoice_service.clone())
            .app_data(estimate_service.clone())
            .app_data(recurring_service.clone())
            .app_data(profile_service.clone())
            .app_data(report_service.clone())
            .wrap(SessionAuth::new(db_pool.clone()))
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .configure(health_controller::configure)
            .configure(auth_routes.clone())
            .configure(client_controller::configure)
            .configure(product_controller::configure)
            .configure(invoice_controller::configure)
            .configure(estimate_controller::configure)
            .configure(recurring_controller::configure)
            .configure(profile_controller::configure)
            .configure(report_controller::configure)
    })
    .workers(workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}
