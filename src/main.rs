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
use axum::{middleware::from_fn_with_state, response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use middleware::auth::auth_middleware;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env();

    // Configurar logging: debug en desarrollo, info en el resto
    let log_level = if config.is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("🔧 Taller CRM - Gestión de flota y mantenimiento");
    info!("================================================");

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };
    info!("✅ Base de datos conectada");

    let app_state = AppState::new(pool, config.clone());

    // Rutas que requieren token de acceso
    let protected = Router::new()
        .merge(routes::auth_routes::create_profile_router())
        .nest("/api/users", routes::user_routes::create_user_router())
        .nest("/api/vehicles", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/workorders", routes::workorder_routes::create_workorder_router())
        .nest("/api/stock", routes::stock_routes::create_stock_router())
        .nest("/api/solicitudes", routes::solicitud_routes::create_solicitud_router())
        .nest("/api/notifications", routes::notification_routes::create_notification_router())
        .nest("/api/history", routes::history_routes::create_history_router())
        .nest("/api/reports", routes::report_routes::create_report_router())
        .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));

    // En producción el CORS se restringe a los orígenes configurados
    let cors = if config.is_production() && !config.cors_origins.is_empty() {
        cors_middleware_with_origins(config.cors_origins.clone())
    } else {
        cors_middleware()
    };

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/auth", routes::auth_routes::create_auth_router())
        .merge(protected)
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔐 Autenticación:");
    info!("   POST /api/auth/login - Login");
    info!("   POST /api/auth/register - Registro de usuario");
    info!("   GET  /api/auth/profile - Perfil del usuario autenticado");
    info!("👥 Usuarios:");
    info!("   GET  /api/users - Listar usuarios (filtro ?rol=)");
    info!("   POST /api/users/mecanicos - Crear mecánico");
    info!("   PATCH /api/users/:id/schedule - Actualizar horario semanal");
    info!("🚗 Vehículos:");
    info!("   GET  /api/vehicles - Listar vehículos");
    info!("   PATCH /api/vehicles/:id/estado - Cambiar estado");
    info!("🔧 Órdenes de trabajo:");
    info!("   POST /api/workorders - Crear OT");
    info!("   PATCH /api/workorders/:id/asignar - Asignar mecánico");
    info!("   POST /api/workorders/:id/pausar - Iniciar break del mecánico");
    info!("   POST /api/workorders/:id/reanudar - Finalizar break");
    info!("📦 Stock:");
    info!("   GET  /api/stock/repuestos - Catálogo de repuestos");
    info!("   POST /api/stock/movimientos - Registrar movimiento");
    info!("📋 Historial y reportes:");
    info!("   GET  /api/history?entityType= - Historial genérico");
    info!("   GET  /api/history/export - Exportar historial CSV");
    info!("   GET  /api/reports/breaks - Reporte mensual de breaks");
    info!("   GET  /api/reports/breaks/export - Exportar reporte CSV");

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

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "taller_crm",
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
