use std::collections::HashMap;

use crate::models::CycleIndex;

/// Asignación parcial curso -> ciclo, indexada por posición en la malla.
///
/// Cada `assign` apila un marco `(curso, ciclo)` y `undo` desapila exactamente
/// ese marco, de modo que deshacer es O(1) y ninguna rama observa cambios de
/// una rama hermana.
#[derive(Debug, Clone)]
pub struct Assignment {
    cycles: Vec<Option<CycleIndex>>,
    load: HashMap<CycleIndex, usize>,
    trail: Vec<(usize, CycleIndex)>,
}

impl Assignment {
    pub fn new(catalog_len: usize) -> Self {
        Assignment {
            cycles: vec![None; catalog_len],
            load: HashMap::new(),
            trail: Vec::new(),
        }
    }

    pub fn assign(&mut self, course: usize, cycle: CycleIndex) {
        debug_assert!(self.cycles[course].is_none(), "course assigned twice");
        self.cycles[course] = Some(cycle);
        *self.load.entry(cycle).or_insert(0) += 1;
        self.trail.push((course, cycle));
    }

    /// Deshace la última asignación.
    pub fn undo(&mut self) -> Option<(usize, CycleIndex)> {
        let (course, cycle) = self.trail.pop()?;
        self.cycles[course] = None;
        if let Some(n) = self.load.get_mut(&cycle) {
            *n -= 1;
            if *n == 0 {
                self.load.remove(&cycle);
            }
        }
        Some((course, cycle))
    }

    pub fn cycle_of(&self, course: usize) -> Option<CycleIndex> {
        self.cycles.get(course).copied().flatten()
    }

    pub fn is_assigned(&self, course: usize) -> bool {
        self.cycle_of(course).is_some()
    }

    /// Cursos ya comprometidos en `cycle`.
    pub fn load(&self, cycle: CycleIndex) -> usize {
        self.load.get(&cycle).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.trail.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trail.is_empty()
    }

    /// Marcos en orden de asignación.
    pub fn frames(&self) -> &[(usize, CycleIndex)] {
        &self.trail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_and_undo_restore_state() {
        let mut a = Assignment::new(3);
        a.assign(0, 1);
        a.assign(2, 1);
        assert_eq!(a.load(1), 2);
        assert_eq!(a.undo(), Some((2, 1)));
        assert_eq!(a.load(1), 1);
        assert!(!a.is_assigned(2));
        assert_eq!(a.cycle_of(0), Some(1));
        assert_eq!(a.undo(), Some((0, 1)));
        assert_eq!(a.load(1), 0);
        assert!(a.is_empty());
        assert_eq!(a.undo(), None);
    }
}
