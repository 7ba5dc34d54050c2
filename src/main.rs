// --- Planificador curricular - Archivo principal ---

use quickplan::config::AppConfig;
use quickplan::{logging, run_server};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::from_env();
    logging::init(config.log_level);

    log::info!("=== Planificador curricular (API) ===");
    log::info!("catálogo: {}, horizonte por defecto: {} ciclos", config.catalog, config.default_horizon);
    run_server(config).await
}
