mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use config::EnvironmentConfig;
use middleware::cors::cors_middleware;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚚 FleetFlow - Fleet Management Back Office");
    info!("===========================================");

    let config = EnvironmentConfig::from_env();

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    // En producción el CORS se restringe a los orígenes configurados
    let cors = if config.is_production() && !config.cors_origins.is_empty() {
        middleware::cors::cors_middleware_with_origins(&config.cors_origins)
    } else {
        cors_middleware()
    };

    let app_state = AppState::new(pool, config);

    let app = Router::new()
        .route("/test", get(test_endpoint))
        .nest("/api/auth", routes::auth_routes::create_auth_router())
        .nest("/api/vehicles", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/drivers", routes::driver_routes::create_driver_router())
        .nest("/api/trips", routes::trip_routes::create_trip_router())
        .nest("/api/fuel-logs", routes::fuel_log_routes::create_fuel_log_router())
        .nest(
            "/api/service-logs",
            routes::service_log_routes::create_service_log_router(),
        )
        .nest(
            "/api/dashboard",
            routes::dashboard_routes::create_dashboard_router(),
        )
        .nest(
            "/api/analytics",
            routes::analytics_routes::create_analytics_router(),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   POST /api/auth/login - Login");
    info!("   POST /api/auth/forgot-password - Pedir reset de password");
    info!("   POST /api/auth/reset-password - Resetear password");
    info!("   GET  /api/auth/me - Usuario actual");
    info!("🚗 Vehicles:");
    info!("   GET/POST /api/vehicles - Listar / crear");
    info!("   GET  /api/vehicles/available - Disponibles para dispatch");
    info!("   GET/PUT/DELETE /api/vehicles/:id");
    info!("🧑 Drivers:");
    info!("   GET/POST /api/drivers - Listar / crear");
    info!("   GET  /api/drivers/available - Disponibles para dispatch");
    info!("   GET/PUT/DELETE /api/drivers/:id");
    info!("🚦 Trips:");
    info!("   GET/POST /api/trips - Listar / crear");
    info!("   GET/PUT/DELETE /api/trips/:id");
    info!("   PATCH /api/trips/:id/status - Dispatch / complete / cancel");
    info!("⛽ Logs:");
    info!("   /api/fuel-logs, /api/service-logs - CRUD de logs");
    info!("📊 Dashboard y Analytics:");
    info!("   GET  /api/dashboard/kpis - KPIs de la flota");
    info!("   GET  /api/analytics/fuel-efficiency|vehicle-roi|cost-per-km|operational-cost");
    info!("   GET  /api/analytics/export/csv|pdf?type=vehicles|trips|analytics");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Endpoint de prueba simple
async fn test_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "message": "FleetFlow API funcionando correctamente",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
