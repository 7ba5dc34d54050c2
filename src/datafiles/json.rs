use std::error::Error;
use std::fs;
use std::path::Path;

use crate::models::{Course, Plan};

/// Lee un arreglo de cursos en JSON (formato `cursos.json`).
pub fn leer_cursos_json<P: AsRef<Path>>(path: P) -> Result<Vec<Course>, Box<dyn Error>> {
    let s = fs::read_to_string(path.as_ref())?;
    parse_courses_json(&s)
}

pub fn parse_courses_json(s: &str) -> Result<Vec<Course>, Box<dyn Error>> {
    let courses: Vec<Course> = serde_json::from_str(s)?;
    Ok(courses)
}

/// Guarda un plan como JSON legible.
pub fn save_plan_json<P: AsRef<Path>>(plan: &Plan, path: P) -> Result<(), Box<dyn Error>> {
    if let Some(dir) = path.as_ref().parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    let text = serde_json::to_string_pretty(plan)?;
    fs::write(path, text)?;
    Ok(())
}

/// Carga un plan guardado con `save_plan_json`.
pub fn load_plan_json<P: AsRef<Path>>(path: P) -> Result<Plan, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let plan: Plan = serde_json::from_str(&s)?;
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spanish_keys() {
        let json = r#"[
            {"codigo": "MAT1", "nombre": "Cálculo I", "anio": 1, "ciclo": 1, "creditos": 6, "requisitos": []},
            {"codigo": "MAT2", "nombre": "Cálculo II", "anio": 1, "ciclo": 2, "creditos": 6, "requisitos": ["MAT1"]}
        ]"#;
        let courses = parse_courses_json(json).unwrap();
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[1].prerequisites, vec!["MAT1"]);
        assert_eq!(courses[0].credits, 6.0);
    }

    #[test]
    fn test_parse_english_keys_and_offered_terms() {
        let json = r#"[{"code": "ELE", "name": "Electivo", "year": 3, "term": 1, "offered_terms": [1, 2]}]"#;
        let courses = parse_courses_json(json).unwrap();
        assert_eq!(courses[0].offered_terms, vec![1, 2]);
        assert_eq!(courses[0].credits, 0.0);
        assert!(courses[0].prerequisites.is_empty());
    }
}
