use quickplan::{
    plan_single_cycle, simulate_progress, validate_manual_selection, CompletionHistory, Course, CourseCatalog,
    GreedyOptions,
};

fn malla() -> CourseCatalog {
    CourseCatalog::new(vec![
        Course::new("MAT1", "Cálculo I", 1, 1),
        Course::new("INF1", "Programación", 1, 1),
        Course::new("QUI1", "Química", 1, 1),
        Course::new("MAT2", "Cálculo II", 1, 2).with_prerequisites(&["MAT1"]),
        Course::new("INF2", "Estructuras de Datos", 1, 2).with_prerequisites(&["INF1"]),
        Course::new("INF3", "Algoritmos", 2, 1).with_prerequisites(&["INF2", "MAT2"]),
        Course::new("EST1", "Estadística", 2, 2).with_prerequisites(&["MAT2"]),
        Course::new("ELE", "Electivo", 2, 1).with_offered_terms(&[1, 2]),
    ])
    .expect("La malla debe ser válida")
}

fn codes(courses: &[Course]) -> Vec<&str> {
    courses.iter().map(|c| c.code.as_str()).collect()
}

#[test]
fn test_single_cycle_prefers_first_year_and_unblocking_courses() {
    let cat = malla();
    let next = plan_single_cycle(&cat, &CompletionHistory::new(), 1, 2);
    // MAT1 desbloquea dos cursos, INF1 uno; QUI1 y ELE quedan fuera
    assert_eq!(codes(&next), vec!["MAT1", "INF1"]);
}

#[test]
fn test_single_cycle_only_in_term_courses() {
    let cat = malla();
    let hist: CompletionHistory = ["MAT1", "INF1", "QUI1"].into_iter().collect();
    let next = plan_single_cycle(&cat, &hist, 2, 5);
    // ciclo 2 es término 2: ELE se dicta en ambos términos
    assert_eq!(codes(&next), vec!["MAT2", "INF2", "ELE"]);
}

#[test]
fn test_simulation_respects_prerequisites_and_load() {
    let cat = malla();
    let hist = CompletionHistory::new();
    let max = 2;
    let plan = simulate_progress(&cat, &hist, &CompletionHistory::new(), 1, max, 6, &GreedyOptions::default());

    assert_eq!(plan.groups.len(), 6);
    for group in plan.groups.iter() {
        assert!(group.courses.len() <= max);
        for course in group.courses.iter() {
            for req in course.prerequisites.iter() {
                let earlier = plan.cycle_of(req).is_some_and(|c| c < group.cycle);
                assert!(earlier || hist.contains(req), "{} antes que {}", course.code, req);
            }
        }
    }
    // ningún curso se repite
    let mut seen: Vec<&str> = plan.groups.iter().flat_map(|g| g.codes()).collect();
    let total = seen.len();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), total);
}

#[test]
fn test_simulation_keeps_empty_cycles() {
    let cat = CourseCatalog::new(vec![Course::new("T2", "Taller", 1, 2)]).unwrap();
    let plan = simulate_progress(&cat, &CompletionHistory::new(), &CompletionHistory::new(), 1, 1, 3, &GreedyOptions::default());
    let layout: Vec<(u32, usize)> = plan.groups.iter().map(|g| (g.cycle, g.courses.len())).collect();
    assert_eq!(layout, vec![(1, 0), (2, 1), (3, 0)]);

    let filled = simulate_progress(
        &cat,
        &CompletionHistory::new(),
        &CompletionHistory::new(),
        1,
        1,
        3,
        &GreedyOptions { fill_off_term: true, ..GreedyOptions::default() },
    );
    assert_eq!(filled.cycle_of("T2"), Some(1));
}

#[test]
fn test_manual_selection_filters_missing_prerequisites() {
    let cat = malla();
    let hist: CompletionHistory = ["MAT1"].into_iter().collect();
    let selection: Vec<String> = ["MAT2", "INF2", "EST1", "NOPE", "MAT2"].iter().map(|s| s.to_string()).collect();
    let valid = validate_manual_selection(&cat, &hist, &selection);
    // EST1 vale porque MAT2 también está en la selección
    assert_eq!(codes(&valid), vec!["MAT2", "EST1"]);
}
