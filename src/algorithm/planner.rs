// planner.rs - Orquestador de la planificación completa de la carrera
//
// PHASE 1: ConstraintModel
//   - Cursos pendientes = malla - historial
//   - Dominio de cada pendiente dentro del horizonte
//   - Dominio vacío => Infeasible(EmptyDomain), sin búsqueda
//
// PHASE 2: BacktrackingSearchEngine
//   - MRV + chequeo hacia adelante, primera solución
//   - Métricas nodos/retrocesos por ejecución
//
// PHASE 3: PlanAssembler
//   - Agrupar por ciclo, ordenar por (año, término, nombre), créditos por ciclo

use crate::algorithm::assembler::PlanAssembler;
use crate::algorithm::backtracking::{BacktrackingSearchEngine, SearchLimits, SearchOutcome, VariableTieBreak};
use crate::algorithm::constraints::{ConstraintModel, DomainStrategy, Horizon, DEFAULT_TERMS_PER_YEAR};
use crate::catalog::CourseCatalog;
use crate::models::{CompletionHistory, CycleIndex, InfeasibleReason, PlanOutcome, SearchMetrics};

/// Ajustes de una ejecución de `plan_full_program_with`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerOptions {
    pub strategy: DomainStrategy,
    pub terms_per_year: u8,
    pub limits: SearchLimits,
    pub tie_break: VariableTieBreak,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        PlannerOptions {
            strategy: DomainStrategy::TermRestricted,
            terms_per_year: DEFAULT_TERMS_PER_YEAR,
            limits: SearchLimits::unlimited(),
            tie_break: VariableTieBreak::CatalogOrder,
        }
    }
}

/// Planifica todos los cursos pendientes en ciclos futuros con las opciones por defecto.
pub fn plan_full_program(
    catalog: &CourseCatalog,
    history: &CompletionHistory,
    current_cycle: CycleIndex,
    max_courses: usize,
    horizon_cycles: u32,
) -> (PlanOutcome, SearchMetrics) {
    plan_full_program_with(
        catalog,
        history,
        current_cycle,
        max_courses,
        horizon_cycles,
        &PlannerOptions::default(),
    )
}

pub fn plan_full_program_with(
    catalog: &CourseCatalog,
    history: &CompletionHistory,
    current_cycle: CycleIndex,
    max_courses: usize,
    horizon_cycles: u32,
    opts: &PlannerOptions,
) -> (PlanOutcome, SearchMetrics) {
    let mut metrics = SearchMetrics::default();

    for code in history.iter().filter(|c| !catalog.contains(c)) {
        log::warn!("completed course '{}' is not in the catalog; ignored", code);
    }

    // PHASE 1
    let horizon = Horizon::new(current_cycle, horizon_cycles).with_terms_per_year(opts.terms_per_year);
    let model = match ConstraintModel::build(catalog, history, &horizon, opts.strategy, max_courses) {
        Ok(m) => m,
        Err(courses) => {
            log::info!(
                "plan infeasible: {} course(s) never offered in cycles {}..{}: {:?}",
                courses.len(),
                current_cycle,
                current_cycle.saturating_add(horizon_cycles),
                courses
            );
            return (
                PlanOutcome::Infeasible { reason: InfeasibleReason::EmptyDomain { courses } },
                metrics,
            );
        }
    };
    log::info!(
        "PHASE 1: {} pending of {} courses, horizon {} cycles from {}, max {} per cycle ({:?})",
        model.pending_len(),
        catalog.len(),
        horizon_cycles,
        current_cycle,
        max_courses,
        opts.strategy
    );

    // PHASE 2
    let outcome = BacktrackingSearchEngine::new(&model)
        .with_limits(opts.limits)
        .with_tie_break(opts.tie_break)
        .solve(&mut metrics);
    log::info!(
        "PHASE 2: search done, nodes={} backtracks={}",
        metrics.nodes,
        metrics.backtracks
    );

    // PHASE 3
    let result = match outcome {
        SearchOutcome::Solved(assignment) => {
            let plan = PlanAssembler::new(catalog, opts.terms_per_year).assemble(&assignment);
            log::info!(
                "PHASE 3: plan with {} courses over {} cycles",
                plan.course_count(),
                plan.groups.len()
            );
            PlanOutcome::Planned { plan }
        }
        SearchOutcome::Exhausted => {
            log::info!("no plan: search exhausted");
            PlanOutcome::Infeasible { reason: InfeasibleReason::SearchExhausted }
        }
        SearchOutcome::LimitReached => PlanOutcome::Infeasible {
            reason: InfeasibleReason::LimitReached { nodes: metrics.nodes },
        },
    };

    (result, metrics)
}

/// Ciclo en que terminaría la carrera según el plan completo.
pub fn predict_graduation(
    catalog: &CourseCatalog,
    history: &CompletionHistory,
    current_cycle: CycleIndex,
    max_courses: usize,
    horizon_cycles: u32,
) -> Option<CycleIndex> {
    predict_graduation_with(
        catalog,
        history,
        current_cycle,
        max_courses,
        horizon_cycles,
        &PlannerOptions::default(),
    )
}

/// Como `predict_graduation`, con estrategia, límites y desempate explícitos.
/// `None` si no hay plan o no queda nada pendiente.
pub fn predict_graduation_with(
    catalog: &CourseCatalog,
    history: &CompletionHistory,
    current_cycle: CycleIndex,
    max_courses: usize,
    horizon_cycles: u32,
    opts: &PlannerOptions,
) -> Option<CycleIndex> {
    let (outcome, _) = plan_full_program_with(catalog, history, current_cycle, max_courses, horizon_cycles, opts);
    outcome.plan().and_then(|p| p.last_cycle())
}
