use anyhow::Result;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use dotenvy::dotenv;

use vehicle_inventory::api::create_api_router;
use vehicle_inventory::clients::{MapsClient, PriceClient};
use vehicle_inventory::config::{DatabaseConfig, EnvironmentConfig};
use vehicle_inventory::discovery::{EndpointResolver, EndpointTarget, HttpDiscoveryClient};
use vehicle_inventory::middleware::cors_middleware;
use vehicle_inventory::models::seed_manufacturers;
use vehicle_inventory::repositories::{
    init_schema, InMemoryManufacturerStore, InMemoryVehicleStore, ManufacturerStore,
    PostgresManufacturerStore, PostgresVehicleStore, VehicleStore,
};
use vehicle_inventory::services::VehicleService;
use vehicle_inventory::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::default();

    // Configurar logging
    let log_level = if config.is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("🚗 Vehicles API - Inventario con enriquecimiento en vivo");
    info!("=========================================================");

    // Almacén de registros: Postgres si hay DATABASE_URL, memoria si no
    let (vehicle_store, manufacturer_store) = match &config.database_url {
        Some(url) => {
            let pool = match DatabaseConfig::new(url).create_pool().await {
                Ok(pool) => pool,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {}", e);
                    return Err(anyhow::anyhow!("Error de base de datos: {}", e));
                }
            };
            init_schema(&pool).await?;
            info!("✅ PostgreSQL conectado exitosamente");

            (
                Arc::new(PostgresVehicleStore::new(pool.clone())) as Arc<dyn VehicleStore>,
                Arc::new(PostgresManufacturerStore::new(pool)) as Arc<dyn ManufacturerStore>,
            )
        }
        None => {
            warn!("⚠️ DATABASE_URL no configurada, usando almacén en memoria");
            (
                Arc::new(InMemoryVehicleStore::new()) as Arc<dyn VehicleStore>,
                Arc::new(InMemoryManufacturerStore::new()) as Arc<dyn ManufacturerStore>,
            )
        }
    };

    // Datos de referencia de fabricantes
    for manufacturer in seed_manufacturers() {
        manufacturer_store.save(manufacturer).await?;
    }
    info!("✅ Fabricantes de referencia cargados");

    // Resolución de endpoints: el registro solo se consulta para
    // pricing y únicamente si el discovery está activo
    let discovery = Arc::new(HttpDiscoveryClient::new(
        config.discovery_url.clone(),
        config.http_timeout_ms,
    ));
    let resolver = EndpointResolver::new(discovery);

    let price_client = PriceClient::new(
        resolver.clone(),
        EndpointTarget::new(
            &config.pricing_service_name,
            config.pricing_use_discovery,
            &config.pricing_endpoint_local,
        ),
        config.http_timeout_ms,
    );
    let maps_client = MapsClient::new(
        resolver,
        EndpointTarget::new("maps", false, &config.maps_endpoint),
        config.http_timeout_ms,
    );

    let service = VehicleService::new(
        vehicle_store,
        manufacturer_store,
        price_client,
        maps_client,
        config.enrich_on_update,
    );

    let app_state = AppState::new(service, config.clone());

    let app = create_api_router()
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware())
        .with_state(app_state);

    let addr = config.server_url();

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /cars - Listar vehículos (precio y dirección en vivo)");
    info!("   GET    /cars/:id - Obtener vehículo");
    info!("   POST   /cars - Crear vehículo");
    info!("   PUT    /cars/:id - Actualizar vehículo");
    info!("   DELETE /cars/:id - Eliminar vehículo");
    info!("   GET    /health - Health check");

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
