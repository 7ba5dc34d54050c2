use actix_web::{HttpResponse, Responder};
use serde_json::json;

use crate::api_json::PlanRequest;

pub async fn help_handler() -> impl Responder {
    let example = PlanRequest {
        completed: vec!["MAT1".to_string(), "Programación".to_string()],
        in_progress: vec!["FIS1".to_string()],
        current_cycle: 3,
        max_courses: 4,
        horizon: Some(8),
        strategy: None,
        n_cycles: Some(4),
        fill_off_term: false,
        selection: vec!["MAT2".to_string(), "INF2".to_string()],
    };

    let help = json!({
        "description": "API de planificación curricular. Todos los POST aceptan el mismo JSON (ver 'post_example'); cada endpoint usa sólo los campos que necesita.",
        "post_example": example,
        "endpoints": {
            "POST /plan/full": "plan completo por búsqueda con retroceso (completed, current_cycle, max_courses, horizon?, strategy?)",
            "POST /plan/next": "recomendación para el ciclo actual",
            "POST /plan/simulate": "simulación voraz de n_cycles ciclos (fill_off_term opcional) con avisos de riesgo",
            "POST /plan/validate": "filtra 'selection' según requisitos",
            "POST /plan/graduation": "ciclo estimado de egreso",
            "GET /catalog": "malla en orden topológico",
            "GET /catalog/graph": "grafo de requisitos en DOT",
        },
        "note": "'completed', 'in_progress' y 'selection' aceptan códigos o nombres de cursos (sin distinguir mayúsculas ni acentos). Los ciclos son absolutos y empiezan en 1; los impares son primer término.",
        "strategy_choices": ["term_restricted", "full_horizon"],
    });

    HttpResponse::Ok().json(help)
}
