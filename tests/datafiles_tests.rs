use quickplan::datafiles::{get_datafiles_dir, list_catalog_files, load_catalog, load_plan_json, save_plan_json};
use quickplan::{plan_full_program, CompletionHistory};
use std::env;
use std::path::PathBuf;

fn sample_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("datafiles")
}

#[test]
fn test_bundled_catalog_loads_and_plans() {
    let dir = get_datafiles_dir(Some(&sample_dir()));
    let files = list_catalog_files(&dir).expect("Debe listar datafiles");
    assert!(files.contains(&"cursos.json".to_string()));

    let cat = load_catalog(dir.join("cursos.json")).expect("Debe cargar cursos.json");
    assert_eq!(cat.len(), 19);
    assert_eq!(cat.dependents_count("MAT101").unwrap(), 3);

    let (outcome, metrics) = plan_full_program(&cat, &CompletionHistory::new(), 1, 5, 12);
    let plan = outcome.plan().expect("La malla de ejemplo debe ser planificable");
    assert_eq!(plan.course_count(), 19);
    assert!(metrics.nodes >= 19);
    assert!(plan.groups.iter().all(|g| g.courses.len() <= 5));
}

#[test]
fn test_plan_save_and_load() {
    let cat = load_catalog(sample_dir().join("cursos.json")).expect("Debe cargar cursos.json");
    let hist: CompletionHistory = ["MAT101", "FIS101", "INF101", "COM101"].into_iter().collect();
    let (outcome, _) = plan_full_program(&cat, &hist, 2, 4, 10);
    let plan = outcome.plan().expect("Debe existir un plan").clone();

    let path = env::temp_dir().join("quickplan_datafiles_tests").join("plan_guardado.json");
    save_plan_json(&plan, &path).expect("Debe guardar el plan");
    let loaded = load_plan_json(&path).expect("Debe leer el plan");
    assert_eq!(loaded, plan);
    assert_eq!(loaded.last_cycle(), plan.last_cycle());
}
