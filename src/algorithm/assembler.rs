use std::collections::BTreeMap;

use crate::algorithm::assignment::Assignment;
use crate::algorithm::constraints::term_of;
use crate::catalog::CourseCatalog;
use crate::models::{Course, CycleGroup, CycleIndex, Plan};

/// Convierte una asignación completa en un `Plan` presentable.
pub struct PlanAssembler<'a> {
    catalog: &'a CourseCatalog,
    terms_per_year: u8,
}

impl<'a> PlanAssembler<'a> {
    pub fn new(catalog: &'a CourseCatalog, terms_per_year: u8) -> Self {
        PlanAssembler { catalog, terms_per_year }
    }

    pub fn assemble(&self, assignment: &Assignment) -> Plan {
        let pairs = assignment
            .frames()
            .iter()
            .map(|&(idx, cycle)| (cycle, self.catalog.course_at(idx).clone()));
        self.group(pairs)
    }

    /// Agrupa pares (ciclo, curso) por ciclo ascendente; dentro de cada ciclo
    /// ordena por (año, término, nombre).
    pub fn group<I>(&self, pairs: I) -> Plan
    where
        I: IntoIterator<Item = (CycleIndex, Course)>,
    {
        let mut by_cycle: BTreeMap<CycleIndex, Vec<Course>> = BTreeMap::new();
        for (cycle, course) in pairs {
            by_cycle.entry(cycle).or_default().push(course);
        }

        let groups = by_cycle
            .into_iter()
            .map(|(cycle, courses)| self.make_group(cycle, courses))
            .collect();
        Plan { groups }
    }

    pub fn make_group(&self, cycle: CycleIndex, mut courses: Vec<Course>) -> CycleGroup {
        sort_for_display(&mut courses);
        let total_credits = courses.iter().map(|c| c.credits).sum();
        CycleGroup {
            cycle,
            term: term_of(cycle, self.terms_per_year),
            courses,
            total_credits,
        }
    }
}

pub fn sort_for_display(courses: &mut [Course]) {
    courses.sort_by(|a, b| {
        a.year
            .cmp(&b.year)
            .then(a.term.cmp(&b.term))
            .then_with(|| a.name.cmp(&b.name))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_sorted_and_credits_summed() {
        let cat = CourseCatalog::new(vec![
            Course::new("Z1", "Zoología", 1, 1).with_credits(5.0),
            Course::new("A1", "Álgebra", 1, 1).with_credits(6.0),
            Course::new("B2", "Biología", 2, 1).with_credits(4.0),
            Course::new("C1", "Cálculo", 1, 1).with_credits(6.0),
        ])
        .unwrap();
        let mut a = Assignment::new(cat.len());
        a.assign(2, 3);
        a.assign(0, 1);
        a.assign(3, 1);
        a.assign(1, 1);

        let plan = PlanAssembler::new(&cat, 2).assemble(&a);
        assert_eq!(plan.groups.len(), 2);
        assert_eq!(plan.groups[0].cycle, 1);
        assert_eq!(plan.groups[0].codes(), vec!["C1", "Z1", "A1"]);
        assert_eq!(plan.groups[0].total_credits, 17.0);
        assert_eq!(plan.groups[1].cycle, 3);
        assert_eq!(plan.groups[1].term, 1);
        assert_eq!(plan.course_count(), 4);
    }
}
