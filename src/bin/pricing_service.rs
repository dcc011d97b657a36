//! Binario del servicio de precios
//!
//! Servicio independiente que mantiene el precio por vehículo en
//! memoria y lo expone por REST. El API de inventario lo consulta en
//! cada lectura vía /prices/search.

use anyhow::Result;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;
use dotenvy::dotenv;

use vehicle_inventory::middleware::cors_middleware;
use vehicle_inventory::pricing::{create_pricing_router, PriceStore};

/// Vehículos con precio pre-cargado al arrancar
const SEEDED_PRICES: i64 = 19;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("💰 Pricing Service - Precios por vehículo");
    info!("==========================================");

    let store = PriceStore::new();
    store.seed(SEEDED_PRICES).await;
    info!("✅ {} precios iniciales cargados", store.count().await);

    let app = create_pricing_router(store)
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware());

    let port = std::env::var("PRICING_PORT").unwrap_or_else(|_| "8082".to_string());
    let addr = format!("0.0.0.0:{}", port);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   POST   /prices - Crear precio");
    info!("   GET    /prices/:id - Obtener precio");
    info!("   PATCH  /prices/:id - Actualizar precio");
    info!("   DELETE /prices/:id - Eliminar precio");
    info!("   GET    /prices/search?vehicle_id=N - Precio por vehículo");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
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
