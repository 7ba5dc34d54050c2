// Módulo de alto nivel para la planificación de la carrera
// Declarar submódulos (archivos en la carpeta `src/algorithm`)
pub mod alerts;
pub mod assembler;
pub mod assignment;
pub mod backtracking;
pub mod constraints;
pub mod greedy;
pub mod heuristic;
pub mod planner;

// Reexportar sólo la API pública que se usa desde fuera
pub use alerts::{risk_alerts, RiskAlert};
pub use assembler::PlanAssembler;
pub use assignment::Assignment;
pub use backtracking::{BacktrackingSearchEngine, SearchLimits, SearchOutcome, VariableTieBreak};
pub use constraints::{term_of, ConstraintModel, DomainStrategy, Horizon, DEFAULT_TERMS_PER_YEAR};
pub use greedy::{plan_single_cycle, plan_single_cycle_with, simulate_progress, validate_manual_selection, GreedyOptions};
pub use heuristic::{HeuristicEvaluator, PriorityKey};
pub use planner::{plan_full_program, plan_full_program_with, predict_graduation, predict_graduation_with, PlannerOptions};
