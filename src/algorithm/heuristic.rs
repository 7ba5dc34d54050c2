//! Clave de prioridad de un curso pendiente.
//!
//! Orden: menor penalización por atraso, luego término más temprano, luego más
//! dependientes directos (los que desbloquean más trabajo futuro primero).

use std::cmp::Reverse;

use crate::catalog::CourseCatalog;
use crate::models::{CompletionHistory, Course};

/// Factor aplicado a cada año de distancia con el año pendiente más bajo.
pub const YEAR_DELAY_WEIGHT: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PriorityKey {
    pub delay_penalty: i64,
    pub term: u8,
    pub dependents: Reverse<usize>,
}

#[derive(Debug, Clone)]
pub struct HeuristicEvaluator<'a> {
    catalog: &'a CourseCatalog,
    min_pending_year: Option<u32>,
}

impl<'a> HeuristicEvaluator<'a> {
    pub fn new(catalog: &'a CourseCatalog, history: &CompletionHistory) -> Self {
        Self::from_predicate(catalog, |_, c| history.contains(&c.code))
    }

    /// Variante que recibe el criterio de "curso ya resuelto" (historial más
    /// asignaciones en curso, por ejemplo).
    pub fn from_predicate<F>(catalog: &'a CourseCatalog, is_done: F) -> Self
    where
        F: Fn(usize, &Course) -> bool,
    {
        let min_pending_year = catalog
            .iter()
            .enumerate()
            .filter(|(i, c)| !is_done(*i, c))
            .map(|(_, c)| c.year)
            .min();
        HeuristicEvaluator {
            catalog,
            min_pending_year,
        }
    }

    pub fn min_pending_year(&self) -> Option<u32> {
        self.min_pending_year
    }

    pub fn key(&self, course: &Course) -> PriorityKey {
        let dependents = self.catalog.dependents_count(&course.code).unwrap_or(0);
        self.key_with(course, dependents)
    }

    pub fn key_at(&self, idx: usize) -> PriorityKey {
        self.key_with(self.catalog.course_at(idx), self.catalog.dependents_count_at(idx))
    }

    fn key_with(&self, course: &Course, dependents: usize) -> PriorityKey {
        // sin pendientes se usa el año del propio curso (penalización 0)
        let base = self.min_pending_year.unwrap_or(course.year);
        let delay_penalty = (course.year as i64 - base as i64) * YEAR_DELAY_WEIGHT;
        PriorityKey {
            delay_penalty,
            term: course.term,
            dependents: Reverse(dependents),
        }
    }

    /// Ordena in-place por prioridad; el orden estable conserva el de la malla
    /// entre claves iguales.
    pub fn rank(&self, courses: &mut [&Course]) {
        courses.sort_by_key(|c| self.key(c));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> CourseCatalog {
        CourseCatalog::new(vec![
            Course::new("A", "Intro", 1, 1),
            Course::new("B", "Base", 1, 2),
            Course::new("C", "Avanzado", 2, 1).with_prerequisites(&["A"]),
            Course::new("D", "Taller", 2, 1).with_prerequisites(&["A", "B"]),
            Course::new("E", "Tesis", 3, 2).with_prerequisites(&["C"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_delay_penalty_from_min_pending_year() {
        let cat = catalog();
        let history: CompletionHistory = ["A", "B"].into_iter().collect();
        let eval = HeuristicEvaluator::new(&cat, &history);
        assert_eq!(eval.min_pending_year(), Some(2));
        assert_eq!(eval.key(cat.get("C").unwrap()).delay_penalty, 0);
        assert_eq!(eval.key(cat.get("E").unwrap()).delay_penalty, 10);
    }

    #[test]
    fn test_more_dependents_first_on_ties() {
        let cat = catalog();
        let eval = HeuristicEvaluator::new(&cat, &CompletionHistory::new());
        let ka = eval.key(cat.get("A").unwrap());
        let kb = eval.key(cat.get("B").unwrap());
        assert!(ka < kb, "termino 1 antes que termino 2");
        let kc = eval.key(cat.get("C").unwrap());
        let kd = eval.key(cat.get("D").unwrap());
        assert_eq!(kc.delay_penalty, kd.delay_penalty);
        // C desbloquea E, D no desbloquea nada
        assert!(kc < kd);
    }

    #[test]
    fn test_no_pending_courses_gives_zero_penalty() {
        let cat = catalog();
        let all: CompletionHistory = cat.iter().map(|c| c.code.clone()).collect();
        let eval = HeuristicEvaluator::new(&cat, &all);
        assert_eq!(eval.min_pending_year(), None);
        assert_eq!(eval.key(cat.get("E").unwrap()).delay_penalty, 0);
    }

    #[test]
    fn test_rank_is_stable() {
        let cat = catalog();
        let eval = HeuristicEvaluator::new(&cat, &CompletionHistory::new());
        let mut v: Vec<&Course> = cat.iter().collect();
        v.reverse();
        eval.rank(&mut v);
        let codes: Vec<&str> = v.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["A", "B", "C", "D", "E"]);
    }
}
