//! Malla de cursos en memoria: índice por código, grafo de prerequisitos y
//! conteo de dependientes directos.
//!
//! La malla se valida completa al construirse (códigos duplicados, requisitos
//! inexistentes, ciclos de prerequisitos) y luego es de sólo lectura, por lo que
//! puede compartirse entre planificaciones concurrentes sin bloqueo.

use petgraph::algo::toposort;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

use crate::error::PlanError;
use crate::models::Course;

#[derive(Debug, Clone)]
pub struct CourseCatalog {
    courses: Vec<Course>,
    index: HashMap<String, usize>,
    prereq_idx: Vec<Vec<usize>>,
    dependents: Vec<usize>,
    // arista requisito -> curso; el NodeIndex coincide con la posición en `courses`
    graph: DiGraph<String, ()>,
}

impl CourseCatalog {
    /// Construye la malla preservando el orden de entrada.
    pub fn new(courses: Vec<Course>) -> Result<Self, PlanError> {
        let mut index: HashMap<String, usize> = HashMap::with_capacity(courses.len());
        for (i, c) in courses.iter().enumerate() {
            if c.code.trim().is_empty() {
                return Err(PlanError::CatalogInconsistent(format!(
                    "course at position {} has an empty code",
                    i
                )));
            }
            if index.insert(c.code.clone(), i).is_some() {
                return Err(PlanError::CatalogInconsistent(format!(
                    "duplicate course code '{}'",
                    c.code
                )));
            }
        }

        let mut graph: DiGraph<String, ()> = DiGraph::with_capacity(courses.len(), 0);
        for c in courses.iter() {
            graph.add_node(c.code.clone());
        }

        let mut prereq_idx: Vec<Vec<usize>> = Vec::with_capacity(courses.len());
        let mut dependents = vec![0usize; courses.len()];
        for (i, c) in courses.iter().enumerate() {
            let mut reqs: Vec<usize> = Vec::with_capacity(c.prerequisites.len());
            for pr in c.prerequisites.iter() {
                if pr == &c.code {
                    return Err(PlanError::CatalogInconsistent(format!(
                        "course '{}' lists itself as a prerequisite",
                        c.code
                    )));
                }
                let Some(&j) = index.get(pr) else {
                    return Err(PlanError::CatalogInconsistent(format!(
                        "course '{}' requires unknown course '{}'",
                        c.code, pr
                    )));
                };
                // requisitos repetidos cuentan una sola vez
                if reqs.contains(&j) {
                    continue;
                }
                reqs.push(j);
                dependents[j] += 1;
                graph.add_edge(NodeIndex::new(j), NodeIndex::new(i), ());
            }
            prereq_idx.push(reqs);
        }

        if let Err(cycle) = toposort(&graph, None) {
            let code = graph[cycle.node_id()].clone();
            return Err(PlanError::CatalogInconsistent(format!(
                "prerequisite cycle through course '{}'",
                code
            )));
        }

        log::debug!(
            "catalog built: {} courses, {} prerequisite edges",
            courses.len(),
            graph.edge_count()
        );

        Ok(CourseCatalog {
            courses,
            index,
            prereq_idx,
            dependents,
            graph,
        })
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Busca un curso por código.
    pub fn get(&self, code: &str) -> Result<&Course, PlanError> {
        self.index
            .get(code)
            .map(|&i| &self.courses[i])
            .ok_or_else(|| PlanError::NotFound(code.to_string()))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.index.get(code).copied()
    }

    pub fn course_at(&self, idx: usize) -> &Course {
        &self.courses[idx]
    }

    /// Cursos en el orden de entrada.
    pub fn iter(&self) -> std::slice::Iter<'_, Course> {
        self.courses.iter()
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Posiciones de los requisitos directos del curso en `idx`.
    pub fn prerequisite_indices(&self, idx: usize) -> &[usize] {
        &self.prereq_idx[idx]
    }

    /// Número de cursos que exigen directamente a `code`.
    pub fn dependents_count(&self, code: &str) -> Result<usize, PlanError> {
        self.index_of(code)
            .map(|i| self.dependents[i])
            .ok_or_else(|| PlanError::NotFound(code.to_string()))
    }

    pub fn dependents_count_at(&self, idx: usize) -> usize {
        self.dependents[idx]
    }

    /// Cursos ordenados de modo que cada requisito precede a sus dependientes.
    pub fn topological_order(&self) -> Vec<&Course> {
        // la construcción ya garantizó que el grafo es acíclico
        match toposort(&self.graph, None) {
            Ok(order) => order.into_iter().map(|n| &self.courses[n.index()]).collect(),
            Err(_) => self.courses.iter().collect(),
        }
    }

    /// Grafo de prerequisitos en formato Graphviz DOT (requisito -> curso).
    pub fn to_dot(&self) -> String {
        format!("{:?}", Dot::with_config(&self.graph, &[Config::EdgeNoLabel]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Course> {
        vec![
            Course::new("MAT1", "Cálculo I", 1, 1),
            Course::new("MAT2", "Cálculo II", 1, 2).with_prerequisites(&["MAT1"]),
            Course::new("FIS1", "Física I", 1, 2).with_prerequisites(&["MAT1"]),
            Course::new("FIS2", "Física II", 2, 1).with_prerequisites(&["FIS1", "MAT2"]),
        ]
    }

    #[test]
    fn test_lookup_and_order() {
        let catalog = CourseCatalog::new(sample()).unwrap();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.get("FIS1").unwrap().name, "Física I");
        assert_eq!(catalog.get("XXX"), Err(PlanError::NotFound("XXX".to_string())));
        let codes: Vec<&str> = catalog.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["MAT1", "MAT2", "FIS1", "FIS2"]);
    }

    #[test]
    fn test_dependents_count() {
        let catalog = CourseCatalog::new(sample()).unwrap();
        assert_eq!(catalog.dependents_count("MAT1").unwrap(), 2);
        assert_eq!(catalog.dependents_count("MAT2").unwrap(), 1);
        assert_eq!(catalog.dependents_count("FIS2").unwrap(), 0);
        assert!(catalog.dependents_count("NOPE").is_err());
    }

    #[test]
    fn test_rejects_cycle() {
        let courses = vec![
            Course::new("A", "A", 1, 1).with_prerequisites(&["C"]),
            Course::new("B", "B", 1, 2).with_prerequisites(&["A"]),
            Course::new("C", "C", 2, 1).with_prerequisites(&["B"]),
        ];
        match CourseCatalog::new(courses) {
            Err(PlanError::CatalogInconsistent(msg)) => assert!(msg.contains("cycle")),
            other => panic!("se esperaba CatalogInconsistent, se obtuvo {:?}", other),
        }
    }

    #[test]
    fn test_topological_order_puts_prereqs_first() {
        let catalog = CourseCatalog::new(sample()).unwrap();
        let order: Vec<&str> = catalog.topological_order().iter().map(|c| c.code.as_str()).collect();
        let pos = |code: &str| order.iter().position(|c| *c == code).unwrap();
        assert!(pos("MAT1") < pos("MAT2"));
        assert!(pos("FIS1") < pos("FIS2"));
        assert!(pos("MAT2") < pos("FIS2"));
    }

    #[test]
    fn test_dot_export_mentions_courses() {
        let catalog = CourseCatalog::new(sample()).unwrap();
        let dot = catalog.to_dot();
        assert!(dot.starts_with("digraph"));
        assert!(dot.contains("MAT1"));
        assert!(dot.contains("->"));
    }
}
