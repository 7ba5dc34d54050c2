//! Avisos de riesgo sobre un plan simulado: ciclos vacíos o con carga
//! incompleta mientras aún quedan cursos, y cursos que no alcanzan a entrar
//! en los ciclos simulados.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::CourseCatalog;
use crate::models::{CompletionHistory, CycleIndex, Plan};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RiskAlert {
    /// Ningún curso elegible en el ciclo aunque quedaban pendientes.
    EmptyCycle { cycle: CycleIndex },
    /// Menos cursos que la carga máxima aunque quedaban más pendientes.
    Underloaded { cycle: CycleIndex, courses: usize, max_courses: usize },
    /// Cursos que siguen pendientes al terminar la simulación.
    PendingAfterSimulation { courses: Vec<String> },
}

impl fmt::Display for RiskAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskAlert::EmptyCycle { cycle } => write!(f, "Ciclo {}: sin cursos disponibles", cycle),
            RiskAlert::Underloaded { cycle, courses, max_courses } => write!(
                f,
                "Ciclo {}: carga baja ({} de {} cursos), posible atraso",
                cycle, courses, max_courses
            ),
            RiskAlert::PendingAfterSimulation { courses } => write!(
                f,
                "{} curso(s) quedan pendientes al final: {}",
                courses.len(),
                courses.join(", ")
            ),
        }
    }
}

/// Revisa un plan producido por `simulate_progress`.
///
/// `history` es el punto de partida de la simulación (aprobados más en curso).
/// Los ciclos posteriores a completar la malla no generan avisos.
pub fn risk_alerts(catalog: &CourseCatalog, history: &CompletionHistory, plan: &Plan, max_courses: usize) -> Vec<RiskAlert> {
    let mut alerts = Vec::new();
    let mut remaining = catalog.iter().filter(|c| !history.contains(&c.code)).count();

    for group in plan.groups.iter() {
        let taken = group.courses.len();
        if remaining > 0 {
            if taken == 0 {
                alerts.push(RiskAlert::EmptyCycle { cycle: group.cycle });
            } else if taken < max_courses && remaining > taken {
                alerts.push(RiskAlert::Underloaded {
                    cycle: group.cycle,
                    courses: taken,
                    max_courses,
                });
            }
        }
        remaining = remaining.saturating_sub(taken);
    }

    let pending: Vec<String> = catalog
        .iter()
        .filter(|c| !history.contains(&c.code) && plan.cycle_of(&c.code).is_none())
        .map(|c| c.code.clone())
        .collect();
    if !pending.is_empty() {
        alerts.push(RiskAlert::PendingAfterSimulation { courses: pending });
    }

    for a in alerts.iter() {
        log::debug!("risk alert: {}", a);
    }
    alerts
}
