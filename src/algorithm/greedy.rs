//! Planificador voraz (sin retroceso) para recomendaciones rápidas y como
//! punto de comparación del plan completo.
//!
//! Comparte el modelo de datos y la clave heurística con la búsqueda, pero
//! decide ciclo a ciclo: toma los cursos elegibles de mayor prioridad hasta
//! llenar la carga máxima y avanza.

use std::collections::HashSet;

use crate::algorithm::assembler::PlanAssembler;
use crate::algorithm::constraints::{term_of, DEFAULT_TERMS_PER_YEAR};
use crate::algorithm::heuristic::HeuristicEvaluator;
use crate::catalog::CourseCatalog;
use crate::models::{CompletionHistory, Course, CycleIndex, Plan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GreedyOptions {
    /// Completar la carga con cursos elegibles de otros términos cuando los
    /// del término del ciclo no alcanzan.
    pub fill_off_term: bool,
    pub terms_per_year: u8,
}

impl Default for GreedyOptions {
    fn default() -> Self {
        GreedyOptions {
            fill_off_term: false,
            terms_per_year: DEFAULT_TERMS_PER_YEAR,
        }
    }
}

fn is_eligible(course: &Course, history: &CompletionHistory) -> bool {
    !history.contains(&course.code) && course.prerequisites.iter().all(|p| history.contains(p))
}

/// Selección de un ciclo, ya ordenada por prioridad.
fn select_for_cycle<'a>(
    catalog: &'a CourseCatalog,
    history: &CompletionHistory,
    cycle: CycleIndex,
    max_courses: usize,
    opts: &GreedyOptions,
) -> Vec<&'a Course> {
    let term = term_of(cycle, opts.terms_per_year);
    let eval = HeuristicEvaluator::new(catalog, history);

    let mut selected: Vec<&Course> = catalog
        .iter()
        .filter(|c| c.is_offered_in(term) && is_eligible(c, history))
        .collect();

    if opts.fill_off_term && selected.len() < max_courses {
        let mut alternatives: Vec<&Course> = catalog
            .iter()
            .filter(|c| !c.is_offered_in(term) && is_eligible(c, history))
            .collect();
        eval.rank(&mut alternatives);
        let missing = max_courses - selected.len();
        selected.extend(alternatives.into_iter().take(missing));
    }

    eval.rank(&mut selected);
    selected.truncate(max_courses);
    selected
}

/// Recomendación para un único ciclo: cursos elegibles dictados en el término
/// de `current_cycle`, por prioridad, hasta `max_courses`.
pub fn plan_single_cycle(
    catalog: &CourseCatalog,
    history: &CompletionHistory,
    current_cycle: CycleIndex,
    max_courses: usize,
) -> Vec<Course> {
    plan_single_cycle_with(
        catalog,
        history,
        &CompletionHistory::new(),
        current_cycle,
        max_courses,
        &GreedyOptions::default(),
    )
}

/// Como `plan_single_cycle`; `in_progress` son cursos que se están cursando y
/// cuentan como aprobados (no se recomiendan y habilitan a sus dependientes).
pub fn plan_single_cycle_with(
    catalog: &CourseCatalog,
    history: &CompletionHistory,
    in_progress: &CompletionHistory,
    current_cycle: CycleIndex,
    max_courses: usize,
    opts: &GreedyOptions,
) -> Vec<Course> {
    let effective = history.with_in_progress(in_progress);
    select_for_cycle(catalog, &effective, current_cycle, max_courses, opts)
        .into_iter()
        .cloned()
        .collect()
}

/// Simula `n_cycles` ciclos consecutivos aplicando la selección voraz y
/// acumulando lo elegido como aprobado. Los ciclos sin cursos se conservan.
pub fn simulate_progress(
    catalog: &CourseCatalog,
    history: &CompletionHistory,
    in_progress: &CompletionHistory,
    current_cycle: CycleIndex,
    max_courses: usize,
    n_cycles: u32,
    opts: &GreedyOptions,
) -> Plan {
    let assembler = PlanAssembler::new(catalog, opts.terms_per_year);
    let mut running = history.with_in_progress(in_progress);
    let mut groups = Vec::with_capacity(n_cycles as usize);

    for cycle in current_cycle..current_cycle.saturating_add(n_cycles) {
        let chosen: Vec<Course> = select_for_cycle(catalog, &running, cycle, max_courses, opts)
            .into_iter()
            .cloned()
            .collect();
        log::debug!(
            "greedy cycle {}: {:?}",
            cycle,
            chosen.iter().map(|c| c.code.as_str()).collect::<Vec<_>>()
        );
        for c in chosen.iter() {
            running.insert(c.code.clone());
        }
        groups.push(assembler.make_group(cycle, chosen));
    }

    Plan { groups }
}

/// Filtra una selección manual: conserva, en el orden dado, los cursos cuyos
/// requisitos están aprobados o también fueron seleccionados. Los códigos
/// desconocidos se ignoran.
pub fn validate_manual_selection(
    catalog: &CourseCatalog,
    history: &CompletionHistory,
    selection: &[String],
) -> Vec<Course> {
    let chosen: HashSet<&str> = selection.iter().map(|s| s.as_str()).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut valid = Vec::new();

    for code in selection {
        if !seen.insert(code.as_str()) {
            continue;
        }
        let Ok(course) = catalog.get(code) else {
            log::warn!("manual selection: unknown course '{}'", code);
            continue;
        };
        if course
            .prerequisites
            .iter()
            .all(|p| history.contains(p) || chosen.contains(p.as_str()))
        {
            valid.push(course.clone());
        }
    }
    valid
}
