// Estructuras de datos principales

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ciclo académico absoluto (1-based). El ciclo N+1 sigue inmediatamente al N.
pub type CycleIndex = u32;

/// Un curso de la malla, identificado por su código.
///
/// Acepta tanto las claves en inglés como las del formato `cursos.json`
/// en español (`codigo`, `nombre`, `anio`, `ciclo`, `creditos`, `requisitos`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(alias = "codigo")]
    pub code: String,
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(alias = "anio")]
    pub year: u32,
    #[serde(alias = "ciclo")]
    pub term: u8,
    #[serde(default, alias = "creditos")]
    pub credits: f64,
    #[serde(default, alias = "requisitos")]
    pub prerequisites: Vec<String>,
    /// Términos en que se dicta el curso. Vacío => sólo `term`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub offered_terms: Vec<u8>,
}

impl Course {
    pub fn new(code: &str, name: &str, year: u32, term: u8) -> Self {
        Course {
            code: code.to_string(),
            name: name.to_string(),
            year,
            term,
            credits: 0.0,
            prerequisites: Vec::new(),
            offered_terms: Vec::new(),
        }
    }

    pub fn with_credits(mut self, credits: f64) -> Self {
        self.credits = credits;
        self
    }

    pub fn with_prerequisites(mut self, codes: &[&str]) -> Self {
        self.prerequisites = codes.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_offered_terms(mut self, terms: &[u8]) -> Self {
        self.offered_terms = terms.to_vec();
        self
    }

    /// Términos en los que el curso puede cursarse.
    pub fn offering_terms(&self) -> Vec<u8> {
        if self.offered_terms.is_empty() {
            vec![self.term]
        } else {
            self.offered_terms.clone()
        }
    }

    pub fn is_offered_in(&self, term: u8) -> bool {
        if self.offered_terms.is_empty() {
            self.term == term
        } else {
            self.offered_terms.contains(&term)
        }
    }
}

/// Códigos de cursos ya aprobados por el estudiante.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionHistory {
    codes: HashSet<String>,
}

impl CompletionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn insert(&mut self, code: impl Into<String>) -> bool {
        self.codes.insert(code.into())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.codes.iter()
    }

    /// Historial más los cursos que se están cursando, que se dan por aprobados.
    pub fn with_in_progress(&self, in_progress: &CompletionHistory) -> CompletionHistory {
        let mut merged = self.clone();
        merged.codes.extend(in_progress.codes.iter().cloned());
        merged
    }
}

impl<S: Into<String>> FromIterator<S> for CompletionHistory {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        CompletionHistory {
            codes: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Cursos asignados a un mismo ciclo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleGroup {
    pub cycle: CycleIndex,
    pub term: u8,
    pub courses: Vec<Course>,
    pub total_credits: f64,
}

impl CycleGroup {
    pub fn codes(&self) -> Vec<&str> {
        self.courses.iter().map(|c| c.code.as_str()).collect()
    }
}

/// Plan resultante: grupos ordenados por ciclo ascendente.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub groups: Vec<CycleGroup>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.courses.is_empty())
    }

    pub fn course_count(&self) -> usize {
        self.groups.iter().map(|g| g.courses.len()).sum()
    }

    pub fn total_credits(&self) -> f64 {
        self.groups.iter().map(|g| g.total_credits).sum()
    }

    /// Último ciclo con al menos un curso.
    pub fn last_cycle(&self) -> Option<CycleIndex> {
        self.groups
            .iter()
            .filter(|g| !g.courses.is_empty())
            .map(|g| g.cycle)
            .max()
    }

    pub fn cycle_of(&self, code: &str) -> Option<CycleIndex> {
        self.groups
            .iter()
            .find(|g| g.courses.iter().any(|c| c.code == code))
            .map(|g| g.cycle)
    }
}

/// Contadores de búsqueda de una ejecución.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMetrics {
    /// Asignaciones tentativas realizadas.
    pub nodes: u64,
    /// Asignaciones deshechas.
    pub backtracks: u64,
}

impl SearchMetrics {
    pub fn reset(&mut self) {
        *self = SearchMetrics::default();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InfeasibleReason {
    /// Cursos pendientes sin ningún ciclo válido dentro del horizonte.
    EmptyDomain { courses: Vec<String> },
    /// La búsqueda agotó todas las combinaciones.
    SearchExhausted,
    /// Se alcanzó el límite de nodos o de tiempo.
    LimitReached { nodes: u64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlanOutcome {
    Planned { plan: Plan },
    Infeasible { reason: InfeasibleReason },
}

impl PlanOutcome {
    pub fn plan(&self) -> Option<&Plan> {
        match self {
            PlanOutcome::Planned { plan } => Some(plan),
            PlanOutcome::Infeasible { .. } => None,
        }
    }

    pub fn is_feasible(&self) -> bool {
        matches!(self, PlanOutcome::Planned { .. })
    }
}
