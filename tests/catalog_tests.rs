use quickplan::{Course, CourseCatalog, PlanError};

fn expect_inconsistent(courses: Vec<Course>, fragment: &str) {
    match CourseCatalog::new(courses) {
        Err(PlanError::CatalogInconsistent(msg)) => {
            assert!(msg.contains(fragment), "mensaje inesperado: {}", msg)
        }
        Err(other) => panic!("error inesperado: {:?}", other),
        Ok(_) => panic!("la malla debía ser rechazada ({})", fragment),
    }
}

#[test]
fn test_rejects_dangling_prerequisite() {
    expect_inconsistent(
        vec![Course::new("B", "B", 1, 2).with_prerequisites(&["A"])],
        "unknown course 'A'",
    );
}

#[test]
fn test_rejects_duplicate_code() {
    expect_inconsistent(
        vec![Course::new("A", "A", 1, 1), Course::new("A", "Otra A", 1, 2)],
        "duplicate course code 'A'",
    );
}

#[test]
fn test_rejects_self_prerequisite() {
    expect_inconsistent(
        vec![Course::new("A", "A", 1, 1).with_prerequisites(&["A"])],
        "itself",
    );
}

#[test]
fn test_rejects_two_cycle() {
    expect_inconsistent(
        vec![
            Course::new("A", "A", 1, 1).with_prerequisites(&["B"]),
            Course::new("B", "B", 1, 2).with_prerequisites(&["A"]),
        ],
        "prerequisite cycle",
    );
}

#[test]
fn test_rejects_empty_code() {
    expect_inconsistent(vec![Course::new("  ", "Sin código", 1, 1)], "empty code");
}

#[test]
fn test_lookup_and_dependents() {
    let cat = CourseCatalog::new(vec![
        Course::new("MAT1", "Cálculo I", 1, 1),
        Course::new("MAT2", "Cálculo II", 1, 2).with_prerequisites(&["MAT1"]),
        Course::new("FIS2", "Física II", 1, 2).with_prerequisites(&["MAT1"]),
        Course::new("MAT3", "Ecuaciones", 2, 1).with_prerequisites(&["MAT2"]),
    ])
    .unwrap();

    assert_eq!(cat.get("MAT2").unwrap().name, "Cálculo II");
    assert_eq!(cat.get("XYZ"), Err(PlanError::NotFound("XYZ".to_string())));

    // sólo dependientes directos
    assert_eq!(cat.dependents_count("MAT1").unwrap(), 2);
    assert_eq!(cat.dependents_count("MAT2").unwrap(), 1);
    assert_eq!(cat.dependents_count("MAT3").unwrap(), 0);
    assert!(cat.dependents_count("XYZ").is_err());

    let order: Vec<&str> = cat.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(order, vec!["MAT1", "MAT2", "FIS2", "MAT3"]);
}

#[test]
fn test_topological_order_puts_prerequisites_first() {
    let cat = CourseCatalog::new(vec![
        Course::new("C", "C", 2, 1).with_prerequisites(&["B"]),
        Course::new("B", "B", 1, 2).with_prerequisites(&["A"]),
        Course::new("A", "A", 1, 1),
    ])
    .unwrap();
    let topo: Vec<&str> = cat.topological_order().into_iter().map(|c| c.code.as_str()).collect();
    let pos = |code: &str| topo.iter().position(|c| *c == code).unwrap();
    assert!(pos("A") < pos("B"));
    assert!(pos("B") < pos("C"));

    let dot = cat.to_dot();
    assert!(dot.starts_with("digraph"));
    assert!(dot.contains("label = ") && dot.contains("A"));
    assert_eq!(dot.matches("->").count(), 2);
}
