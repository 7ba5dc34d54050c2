use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::algorithm::DomainStrategy;
use crate::catalog::CourseCatalog;
use crate::datafiles::normalize_name;
use crate::error::PlanError;
use crate::models::CompletionHistory;

/// Parámetros de entrada de los endpoints de planificación
///
/// # Estructura del JSON esperado:
/// ```json
/// {
///   "completed": ["MAT1", "Programación"],
///   "in_progress": ["FIS1"],
///   "current_cycle": 3,
///   "max_courses": 4,
///   "horizon": 8,
///   "strategy": "term_restricted",
///   "n_cycles": 4,
///   "fill_off_term": false,
///   "selection": ["MAT2", "INF2"]
/// }
/// ```
///
/// # Campos:
/// - `completed`: códigos o nombres de cursos aprobados (alias `ramos_pasados`, `aprobados`)
/// - `in_progress`: cursos que se están cursando; cuentan como aprobados (alias `por_aprobar`, `cursando`)
/// - `current_cycle`: ciclo absoluto que viene (alias `ciclo_actual`)
/// - `max_courses`: carga máxima por ciclo (alias `max_cursos`)
/// - `horizon`: ciclos a considerar en el plan completo (opcional)
/// - `strategy`: `term_restricted` | `full_horizon` (opcional)
/// - `n_cycles`, `fill_off_term`: sólo para la simulación voraz
/// - `selection`: sólo para validar una selección manual
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    #[serde(default, alias = "ramos_pasados", alias = "aprobados")]
    pub completed: Vec<String>,
    #[serde(default, alias = "por_aprobar", alias = "cursando")]
    pub in_progress: Vec<String>,
    #[serde(alias = "ciclo_actual")]
    pub current_cycle: u32,
    #[serde(alias = "max_cursos")]
    pub max_courses: usize,
    #[serde(default)]
    pub horizon: Option<u32>,
    #[serde(default)]
    pub strategy: Option<DomainStrategy>,
    #[serde(default)]
    pub n_cycles: Option<u32>,
    #[serde(default)]
    pub fill_off_term: bool,
    #[serde(default)]
    pub selection: Vec<String>,
}

pub fn parse_json_input(json_str: &str) -> Result<PlanRequest, serde_json::Error> {
    serde_json::from_str::<PlanRequest>(json_str)
}

impl PlanRequest {
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.current_cycle == 0 {
            return Err(PlanError::InvalidInput("current_cycle must be >= 1".to_string()));
        }
        if self.max_courses == 0 {
            return Err(PlanError::InvalidInput("max_courses must be >= 1".to_string()));
        }
        Ok(())
    }

    pub fn history(&self) -> CompletionHistory {
        self.completed.iter().cloned().collect()
    }

    pub fn in_progress_history(&self) -> CompletionHistory {
        self.in_progress.iter().cloned().collect()
    }

    /// Aprobados más cursos en curso.
    pub fn effective_history(&self) -> CompletionHistory {
        self.history().with_in_progress(&self.in_progress_history())
    }
}

/// Índice nombre normalizado -> código para resolver entradas escritas a mano.
pub struct NameIndex<'a> {
    catalog: &'a CourseCatalog,
    by_name: HashMap<String, &'a str>,
}

impl<'a> NameIndex<'a> {
    pub fn new(catalog: &'a CourseCatalog) -> Self {
        let by_name = catalog
            .iter()
            .map(|c| (normalize_name(&c.name), c.code.as_str()))
            .collect();
        NameIndex { catalog, by_name }
    }

    /// Código para `entry`: el mismo si ya es un código de la malla, o el del
    /// curso con ese nombre (sin distinguir mayúsculas, acentos ni espacios).
    pub fn resolve(&self, entry: &str) -> Option<String> {
        let trimmed = entry.trim();
        if self.catalog.contains(trimmed) {
            return Some(trimmed.to_string());
        }
        let upper = trimmed.to_uppercase();
        if self.catalog.contains(&upper) {
            return Some(upper);
        }
        self.by_name.get(&normalize_name(trimmed)).map(|c| c.to_string())
    }
}

/// Resuelve cada entrada con `resolver`; las que no se resuelven quedan como
/// estaban y se devuelven aparte.
pub fn resolve_codes_with_resolver<F>(entries: Vec<String>, resolver: F) -> (Vec<String>, Vec<String>)
where
    F: Fn(&str) -> Option<String>,
{
    let mut unresolved = Vec::new();
    let resolved = entries
        .into_iter()
        .map(|e| match resolver(&e) {
            Some(code) => code,
            None => {
                unresolved.push(e.clone());
                e
            }
        })
        .collect();
    (resolved, unresolved)
}

/// Valida la solicitud y traduce nombres a códigos usando la malla.
/// Devuelve la solicitud resuelta y las entradas que no se pudieron resolver.
pub fn resolve_request(mut req: PlanRequest, catalog: &CourseCatalog) -> Result<(PlanRequest, Vec<String>), PlanError> {
    req.validate()?;
    let index = NameIndex::new(catalog);
    let (completed, mut unresolved) = resolve_codes_with_resolver(req.completed, |e| index.resolve(e));
    let (in_progress, unresolved_cur) = resolve_codes_with_resolver(req.in_progress, |e| index.resolve(e));
    let (selection, unresolved_sel) = resolve_codes_with_resolver(req.selection, |e| index.resolve(e));
    unresolved.extend(unresolved_cur);
    unresolved.extend(unresolved_sel);
    req.completed = completed;
    req.in_progress = in_progress;
    req.selection = selection;
    if !unresolved.is_empty() {
        log::warn!("unresolved course entries: {:?}", unresolved);
    }
    Ok((req, unresolved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Course;

    fn catalog() -> CourseCatalog {
        CourseCatalog::new(vec![
            Course::new("MAT1", "Cálculo I", 1, 1),
            Course::new("INF1", "Programación", 1, 1),
            Course::new("INF2", "Programación Avanzada", 1, 2).with_prerequisites(&["INF1"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_parse_spanish_aliases() {
        let json_data = r#"
        {
            "ramos_pasados": ["MAT1"],
            "ciclo_actual": 2,
            "max_cursos": 3
        }
        "#;
        let req = parse_json_input(json_data).expect("Debe parsear JSON con alias");
        assert_eq!(req.completed, vec!["MAT1"]);
        assert_eq!(req.current_cycle, 2);
        assert_eq!(req.max_courses, 3);
        assert!(req.horizon.is_none());
        assert!(!req.fill_off_term);
    }

    #[test]
    fn test_resolve_names_to_codes() {
        let cat = catalog();
        let req = PlanRequest {
            completed: vec!["calculo i".into(), "PROGRAMACION".into(), "inf2".into(), "Historia".into()],
            in_progress: vec!["Programación Avanzada".into()],
            current_cycle: 1,
            max_courses: 2,
            horizon: None,
            strategy: None,
            n_cycles: None,
            fill_off_term: false,
            selection: Vec::new(),
        };
        let (resolved, unresolved) = resolve_request(req, &cat).unwrap();
        assert_eq!(resolved.completed, vec!["MAT1", "INF1", "INF2", "Historia"]);
        assert_eq!(unresolved, vec!["Historia"]);
        assert_eq!(resolved.in_progress, vec!["INF2"]);
        assert!(resolved.effective_history().contains("INF2"));
    }

    #[test]
    fn test_validate_rejects_zero_cycle() {
        let req = parse_json_input(r#"{"current_cycle": 0, "max_courses": 2}"#).unwrap();
        assert!(matches!(req.validate(), Err(PlanError::InvalidInput(_))));
    }
}
