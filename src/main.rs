use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use tractor_rental::config::environment::EnvironmentConfig;
use tractor_rental::create_app;
use tractor_rental::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🚜 Tractor Rental - API del dashboard");
    info!("====================================");
    info!("⚙️ Entorno: {}", config.environment);

    let addr: SocketAddr = config.server_url().parse()?;
    let app_state = AppState::from_config(config)?;
    let app = create_app(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /test - Endpoint de prueba");
    info!("🚜 Tractores:");
    info!("   GET  /api/tractors - Listar tractores (search, status)");
    info!("   POST /api/tractors - Crear tractor");
    info!("   GET  /api/tractors/:id - Obtener tractor");
    info!("   PUT  /api/tractors/:id - Actualizar tractor");
    info!("   DELETE /api/tractors/:id - Eliminar tractor");
    info!("   POST /api/tractors/:id/quote - Cotizar alquiler");
    info!("   POST /api/tractors/:id/bookings - Reservar tractor");
    info!("📋 Alquileres:");
    info!("   GET  /api/rentals - Listar alquileres (search, status)");
    info!("   GET  /api/rentals/:id - Obtener alquiler");
    info!("   PUT  /api/rentals/:id - Actualizar alquiler");
    info!("   DELETE /api/rentals/:id - Eliminar alquiler");
    info!("💰 Pagos:");
    info!("   GET  /api/payments - Listar pagos (search, status)");
    info!("   POST /api/payments - Registrar pago");
    info!("   GET  /api/payments/:id - Obtener pago");
    info!("   PUT  /api/payments/:id - Actualizar pago");
    info!("   DELETE /api/payments/:id - Eliminar pago");
    info!("👥 Clientes:");
    info!("   GET  /api/customers - Resumen de clientes");
    info!("   GET  /api/customers/:name/rentals - Historial de un cliente");
    info!("📊 Panel y reportes:");
    info!("   GET  /api/dashboard - Indicadores del panel");
    info!("   GET  /api/reports?range=thisMonth|lastMonth|last3Months - Reportes");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
