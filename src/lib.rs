// Biblioteca raíz del crate `quickplan`.
// Planificación curricular: malla de cursos con requisitos, plan completo por
// búsqueda con retroceso y recomendaciones voraces por ciclo.
pub mod algorithm;
pub mod api_json;
pub mod catalog;
pub mod config;
pub mod datafiles;
pub mod error;
pub mod logging;
pub mod models;
pub mod server;
pub mod server_handlers;

pub use algorithm::{
    plan_full_program, plan_full_program_with, plan_single_cycle, plan_single_cycle_with, predict_graduation,
    predict_graduation_with, risk_alerts, simulate_progress, validate_manual_selection, DomainStrategy,
    GreedyOptions, PlannerOptions, RiskAlert, SearchLimits,
};
pub use catalog::CourseCatalog;
pub use error::PlanError;
pub use models::{CompletionHistory, Course, CycleIndex, Plan, PlanOutcome, SearchMetrics};

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
