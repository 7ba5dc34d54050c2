//! Dominios de ciclos por curso pendiente y las dos restricciones de la
//! búsqueda: orden de prerequisitos y capacidad por ciclo.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::algorithm::assignment::Assignment;
use crate::catalog::CourseCatalog;
use crate::models::{CompletionHistory, Course, CycleIndex};

pub const DEFAULT_TERMS_PER_YEAR: u8 = 2;

/// Cómo se construye el dominio de cada curso.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainStrategy {
    /// Sólo ciclos cuyo término coincide con los términos en que se dicta el curso.
    #[default]
    TermRestricted,
    /// Cualquier ciclo del horizonte.
    FullHorizon,
}

impl FromStr for DomainStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "term" | "term_restricted" | "termino" => Ok(DomainStrategy::TermRestricted),
            "full" | "full_horizon" => Ok(DomainStrategy::FullHorizon),
            other => Err(format!("unknown domain strategy '{}'", other)),
        }
    }
}

/// Ventana de ciclos considerada por la planificación.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Horizon {
    pub current_cycle: CycleIndex,
    pub cycles: u32,
    pub terms_per_year: u8,
}

impl Horizon {
    pub fn new(current_cycle: CycleIndex, cycles: u32) -> Self {
        Horizon {
            current_cycle,
            cycles,
            terms_per_year: DEFAULT_TERMS_PER_YEAR,
        }
    }

    pub fn with_terms_per_year(mut self, terms_per_year: u8) -> Self {
        self.terms_per_year = terms_per_year.max(1);
        self
    }

    /// Ciclos del horizonte en orden ascendente.
    pub fn cycles(&self) -> impl Iterator<Item = CycleIndex> {
        let start = self.current_cycle;
        start..start.saturating_add(self.cycles)
    }

    pub fn term_of(&self, cycle: CycleIndex) -> u8 {
        term_of(cycle, self.terms_per_year)
    }
}

/// Término (1-based) de un ciclo absoluto: 1, 2, 1, 2, ... para dos términos por año.
pub fn term_of(cycle: CycleIndex, terms_per_year: u8) -> u8 {
    let tpy = terms_per_year.max(1) as u32;
    (cycle.saturating_sub(1) % tpy) as u8 + 1
}

/// Dominio de un curso dentro del horizonte, en orden ascendente.
pub fn domain_for(course: &Course, horizon: &Horizon, strategy: DomainStrategy) -> Vec<CycleIndex> {
    match strategy {
        DomainStrategy::TermRestricted => horizon
            .cycles()
            .filter(|&c| course.is_offered_in(horizon.term_of(c)))
            .collect(),
        DomainStrategy::FullHorizon => horizon.cycles().collect(),
    }
}

#[derive(Debug, Clone)]
pub struct ConstraintModel<'a> {
    catalog: &'a CourseCatalog,
    history: &'a CompletionHistory,
    pending: Vec<usize>,
    domains: Vec<Vec<CycleIndex>>,
    max_per_cycle: usize,
}

impl<'a> ConstraintModel<'a> {
    /// Construye los dominios de todos los cursos pendientes (orden de malla).
    ///
    /// Devuelve `Err` con los códigos de los cursos cuyo dominio queda vacío.
    pub fn build(
        catalog: &'a CourseCatalog,
        history: &'a CompletionHistory,
        horizon: &Horizon,
        strategy: DomainStrategy,
        max_per_cycle: usize,
    ) -> Result<Self, Vec<String>> {
        let mut pending = Vec::new();
        let mut domains = Vec::new();
        let mut empty = Vec::new();

        for (idx, course) in catalog.iter().enumerate() {
            if history.contains(&course.code) {
                continue;
            }
            let domain = domain_for(course, horizon, strategy);
            if domain.is_empty() {
                empty.push(course.code.clone());
            }
            pending.push(idx);
            domains.push(domain);
        }

        if !empty.is_empty() {
            return Err(empty);
        }

        Ok(ConstraintModel {
            catalog,
            history,
            pending,
            domains,
            max_per_cycle,
        })
    }

    pub fn catalog(&self) -> &'a CourseCatalog {
        self.catalog
    }

    pub fn history(&self) -> &'a CompletionHistory {
        self.history
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Posición en la malla del pendiente `pos`.
    pub fn pending_course(&self, pos: usize) -> usize {
        self.pending[pos]
    }

    pub fn domain(&self, pos: usize) -> &[CycleIndex] {
        &self.domains[pos]
    }

    pub fn max_per_cycle(&self) -> usize {
        self.max_per_cycle
    }

    /// Capacidad: el ciclo aún admite otro curso.
    pub fn capacity_available(&self, cycle: CycleIndex, assignment: &Assignment) -> bool {
        assignment.load(cycle) < self.max_per_cycle
    }

    /// Orden de prerequisitos: cada requisito está aprobado o asignado a un
    /// ciclo estrictamente anterior a `cycle`.
    pub fn prerequisites_satisfied(&self, course: usize, cycle: CycleIndex, assignment: &Assignment) -> bool {
        self.catalog.prerequisite_indices(course).iter().all(|&p| {
            self.history.contains(&self.catalog.course_at(p).code)
                || assignment.cycle_of(p).is_some_and(|c| c < cycle)
        })
    }

    /// Todos los requisitos de `course` están aprobados o ya asignados, sin
    /// importar el ciclo.
    pub fn prerequisites_resolved(&self, course: usize, assignment: &Assignment) -> bool {
        self.catalog.prerequisite_indices(course).iter().all(|&p| {
            assignment.is_assigned(p) || self.history.contains(&self.catalog.course_at(p).code)
        })
    }

    pub fn is_consistent(&self, course: usize, cycle: CycleIndex, assignment: &Assignment) -> bool {
        self.capacity_available(cycle, assignment) && self.prerequisites_satisfied(course, cycle, assignment)
    }

    /// Chequeo hacia adelante liviano: ningún pendiente sin asignar queda con
    /// todos sus ciclos posibles por debajo de un requisito ya asignado.
    ///
    /// No verifica capacidad ni que exista una completación; sólo descarta
    /// contradicciones inmediatas.
    pub fn forward_check(&self, assignment: &Assignment) -> bool {
        self.pending.iter().enumerate().all(|(pos, &course)| {
            if assignment.is_assigned(course) {
                return true;
            }
            let floor = self
                .catalog
                .prerequisite_indices(course)
                .iter()
                .filter_map(|&p| assignment.cycle_of(p))
                .max();
            match floor {
                Some(f) => self.domains[pos].last().is_some_and(|&last| last > f),
                None => true,
            }
        })
    }
}
