//! Búsqueda con retroceso sobre asignaciones parciales curso -> ciclo.
//!
//! - Variable: entre los pendientes cuyos requisitos ya están aprobados o
//!   asignados, el de menos valores restantes (dominio más pequeño); empates
//!   por orden de malla, o por la clave heurística si así se configura.
//! - Valores: el dominio en orden ascendente.
//! - Tras cada asignación tentativa se ejecuta el chequeo hacia adelante de
//!   `ConstraintModel::forward_check`; si falla o la rama no llega a solución
//!   se deshace la asignación y se prueba el siguiente ciclo.
//! - Devuelve la primera solución encontrada; el orden es determinista.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::{Duration, Instant};

use crate::algorithm::assignment::Assignment;
use crate::algorithm::constraints::ConstraintModel;
use crate::algorithm::heuristic::HeuristicEvaluator;
use crate::models::SearchMetrics;

// cada cuántos nodos se consulta el reloj
const CLOCK_CHECK_EVERY: u64 = 256;

/// Cortes opcionales para catálogos patológicos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_nodes: Option<u64>,
    pub time_limit: Option<Duration>,
}

impl SearchLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_nodes(mut self, max_nodes: u64) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

/// Desempate entre variables con el mismo tamaño de dominio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableTieBreak {
    #[default]
    CatalogOrder,
    Heuristic,
}

impl FromStr for VariableTieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "catalog" | "catalog_order" => Ok(VariableTieBreak::CatalogOrder),
            "heuristic" => Ok(VariableTieBreak::Heuristic),
            other => Err(format!("unknown tie-break '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Solved(Assignment),
    Exhausted,
    LimitReached,
}

enum Step {
    Solved,
    Exhausted,
    Aborted,
}

pub struct BacktrackingSearchEngine<'m, 'a> {
    model: &'m ConstraintModel<'a>,
    limits: SearchLimits,
    tie_break: VariableTieBreak,
    started: Instant,
}

impl<'m, 'a> BacktrackingSearchEngine<'m, 'a> {
    pub fn new(model: &'m ConstraintModel<'a>) -> Self {
        BacktrackingSearchEngine {
            model,
            limits: SearchLimits::default(),
            tie_break: VariableTieBreak::default(),
            started: Instant::now(),
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_tie_break(mut self, tie_break: VariableTieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Ejecuta la búsqueda completa. `metrics` se reinicia al comenzar.
    pub fn solve(&mut self, metrics: &mut SearchMetrics) -> SearchOutcome {
        metrics.reset();
        self.started = Instant::now();
        let mut assignment = Assignment::new(self.model.catalog().len());

        log::debug!(
            "backtracking: {} pending courses, max {} per cycle",
            self.model.pending_len(),
            self.model.max_per_cycle()
        );

        let outcome = match self.search(&mut assignment, metrics) {
            Step::Solved => SearchOutcome::Solved(assignment),
            Step::Exhausted => SearchOutcome::Exhausted,
            Step::Aborted => SearchOutcome::LimitReached,
        };

        log::debug!(
            "backtracking finished in {:?}: nodes={} backtracks={}",
            self.started.elapsed(),
            metrics.nodes,
            metrics.backtracks
        );
        outcome
    }

    fn search(&self, assignment: &mut Assignment, metrics: &mut SearchMetrics) -> Step {
        let model = self.model;
        if assignment.len() == model.pending_len() {
            return Step::Solved;
        }

        let Some(pos) = self.select_variable(assignment) else {
            return Step::Exhausted;
        };
        let course = model.pending_course(pos);

        for &cycle in model.domain(pos) {
            if !model.capacity_available(cycle, assignment) {
                continue;
            }
            if !model.prerequisites_satisfied(course, cycle, assignment) {
                continue;
            }
            if self.limit_reached(metrics) {
                return Step::Aborted;
            }

            assignment.assign(course, cycle);
            metrics.nodes += 1;
            log::trace!(
                "try {} -> cycle {} (depth {})",
                model.catalog().course_at(course).code,
                cycle,
                assignment.len()
            );

            if model.forward_check(assignment) {
                match self.search(assignment, metrics) {
                    Step::Solved => return Step::Solved,
                    Step::Aborted => return Step::Aborted,
                    Step::Exhausted => {}
                }
            }

            assignment.undo();
            metrics.backtracks += 1;
        }

        Step::Exhausted
    }

    /// Pendiente listo (requisitos resueltos) sin asignar con el dominio más pequeño.
    fn select_variable(&self, assignment: &Assignment) -> Option<usize> {
        let model = self.model;
        let unassigned = (0..model.pending_len()).filter(|&pos| {
            let course = model.pending_course(pos);
            !assignment.is_assigned(course) && model.prerequisites_resolved(course, assignment)
        });

        match self.tie_break {
            VariableTieBreak::CatalogOrder => {
                let mut best: Option<(usize, usize)> = None;
                for pos in unassigned {
                    let size = model.domain(pos).len();
                    if best.is_none_or(|(_, s)| size < s) {
                        best = Some((pos, size));
                    }
                }
                best.map(|(pos, _)| pos)
            }
            VariableTieBreak::Heuristic => {
                let history = model.history();
                let eval = HeuristicEvaluator::from_predicate(model.catalog(), |i, c| {
                    history.contains(&c.code) || assignment.is_assigned(i)
                });
                unassigned.min_by_key(|&pos| (model.domain(pos).len(), eval.key_at(model.pending_course(pos))))
            }
        }
    }

    fn limit_reached(&self, metrics: &SearchMetrics) -> bool {
        if let Some(max) = self.limits.max_nodes {
            if metrics.nodes >= max {
                log::warn!("search node limit reached ({} nodes)", metrics.nodes);
                return true;
            }
        }
        if let Some(limit) = self.limits.time_limit {
            if metrics.nodes % CLOCK_CHECK_EVERY == 0 && self.started.elapsed() >= limit {
                log::warn!("search time limit reached after {} nodes", metrics.nodes);
                return true;
            }
        }
        false
    }
}
