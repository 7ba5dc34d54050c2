use actix_web::{web, App, HttpServer};
use std::io;
use std::sync::Arc;

use crate::catalog::CourseCatalog;
use crate::config::AppConfig;
use crate::datafiles::{get_datafiles_dir, load_catalog, resolve_datafile_path};
use crate::server_handlers::{
    catalog_graph_handler, catalog_handler, help_handler, plan_full_handler, plan_graduation_handler,
    plan_next_handler, plan_simulate_handler, plan_validate_handler,
};

/// Estado compartido por todos los workers: la malla (sólo lectura) y la configuración.
pub struct AppState {
    pub catalog: Arc<CourseCatalog>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(catalog: CourseCatalog, config: AppConfig) -> Self {
        AppState { catalog: Arc::new(catalog), config }
    }
}

/// Registra las rutas de la API. Se usa tanto en `run_server` como en los tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/plan/full", web::post().to(plan_full_handler))
        .route("/plan/next", web::post().to(plan_next_handler))
        .route("/plan/simulate", web::post().to(plan_simulate_handler))
        .route("/plan/validate", web::post().to(plan_validate_handler))
        .route("/plan/graduation", web::post().to(plan_graduation_handler))
        .route("/catalog", web::get().to(catalog_handler))
        .route("/catalog/graph", web::get().to(catalog_graph_handler))
        .route("/help", web::get().to(help_handler));
}

/// Carga la malla indicada en la configuración.
pub fn load_configured_catalog(config: &AppConfig) -> io::Result<CourseCatalog> {
    let dir = get_datafiles_dir(config.datafiles_dir.as_deref());
    let path = resolve_datafile_path(&config.catalog, &dir).map_err(|e| io::Error::new(io::ErrorKind::NotFound, e.to_string()))?;
    load_catalog(&path).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
}

pub async fn run_server(config: AppConfig) -> io::Result<()> {
    let catalog = load_configured_catalog(&config)?;
    let bind_addr = config.bind_addr.clone();
    let state = web::Data::new(AppState::new(catalog, config));

    log::info!("listening on http://{}", bind_addr);
    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind(bind_addr.as_str())?
        .run()
        .await
}
