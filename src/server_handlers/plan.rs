use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use std::sync::{Arc, OnceLock};
use tokio::sync::Semaphore;

use crate::algorithm::{
    plan_full_program_with, plan_single_cycle_with, predict_graduation_with, risk_alerts, simulate_progress,
    validate_manual_selection, GreedyOptions,
};
use crate::api_json::{resolve_request, PlanRequest};
use crate::models::Course;
use crate::server::AppState;

static PLAN_SEM: OnceLock<Arc<Semaphore>> = OnceLock::new();

fn plan_semaphore() -> Arc<Semaphore> {
    PLAN_SEM
        .get_or_init(|| Arc::new(Semaphore::new(std::cmp::max(1, num_cpus::get()))))
        .clone()
}

fn bad_request(msg: String) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({"error": msg}))
}

/// Parsea el cuerpo y resuelve nombres de cursos contra la malla.
fn parse_body(state: &AppState, body: serde_json::Value) -> Result<(PlanRequest, Vec<String>), HttpResponse> {
    let req: PlanRequest = serde_json::from_value(body)
        .map_err(|e| bad_request(format!("failed to parse input: {}", e)))?;
    resolve_request(req, &state.catalog).map_err(|e| bad_request(e.to_string()))
}

/// Ejecuta trabajo de CPU fuera del runtime, limitado a un permiso por núcleo.
async fn run_blocking<F, T>(f: F) -> Result<T, HttpResponse>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let permit = plan_semaphore()
        .acquire_owned()
        .await
        .map_err(|_| HttpResponse::InternalServerError().json(json!({"error": "failed to acquire semaphore"})))?;

    tokio::task::spawn_blocking(move || {
        let _permit = permit;
        f()
    })
    .await
    .map_err(|e| HttpResponse::InternalServerError().json(json!({"error": format!("task join error: {}", e)})))
}

fn generated_at() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn codes(courses: &[Course]) -> Vec<&str> {
    courses.iter().map(|c| c.code.as_str()).collect()
}

/// POST /plan/full
pub async fn plan_full_handler(state: web::Data<AppState>, body: web::Json<serde_json::Value>) -> impl Responder {
    let (req, unresolved) = match parse_body(&state, body.into_inner()) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    let catalog = state.catalog.clone();
    let mut opts = state.config.planner_options();
    if let Some(strategy) = req.strategy {
        opts.strategy = strategy;
    }
    let horizon = req.horizon.unwrap_or(state.config.default_horizon);

    let result = run_blocking(move || {
        let history = req.effective_history();
        plan_full_program_with(&catalog, &history, req.current_cycle, req.max_courses, horizon, &opts)
    })
    .await;

    match result {
        Ok((outcome, metrics)) => HttpResponse::Ok().json(json!({
            "outcome": outcome,
            "metrics": metrics,
            "unresolved": unresolved,
            "generated_at": generated_at(),
        })),
        Err(resp) => resp,
    }
}

/// POST /plan/next
pub async fn plan_next_handler(state: web::Data<AppState>, body: web::Json<serde_json::Value>) -> impl Responder {
    let (req, unresolved) = match parse_body(&state, body.into_inner()) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    let opts = GreedyOptions {
        terms_per_year: state.config.terms_per_year,
        ..GreedyOptions::default()
    };
    let recommended = plan_single_cycle_with(
        &state.catalog,
        &req.history(),
        &req.in_progress_history(),
        req.current_cycle,
        req.max_courses,
        &opts,
    );
    HttpResponse::Ok().json(json!({
        "cycle": req.current_cycle,
        "codes": codes(&recommended),
        "courses": recommended,
        "unresolved": unresolved,
        "generated_at": generated_at(),
    }))
}

/// POST /plan/simulate
pub async fn plan_simulate_handler(state: web::Data<AppState>, body: web::Json<serde_json::Value>) -> impl Responder {
    let (req, unresolved) = match parse_body(&state, body.into_inner()) {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    let Some(n_cycles) = req.n_cycles else {
        return bad_request("n_cycles is required".to_string());
    };

    let catalog = state.catalog.clone();
    let opts = GreedyOptions {
        fill_off_term: req.fill_off_term,
        terms_per_year: state.config.terms_per_year,
    };
    let result = run_blocking(move || {
        let in_progress = req.in_progress_history();
        let plan = simulate_progress(
            &catalog,
            &req.history(),
            &in_progress,
            req.current_cycle,
            req.max_courses,
            n_cycles,
            &opts,
        );
        let alerts = risk_alerts(&catalog, &req.effective_history(), &plan, req.max_courses);
        (plan, alerts)
    })
    .await;

    match result {
        Ok((plan, alerts)) => HttpResponse::Ok().json(json!({
            "plan": plan,
            "messages": alerts.iter().map(|a| a.to_string()).collect::<Vec<_>>(),
            "alerts": alerts,
            "unresolved": unresolved,
            "generated_at": generated_at(),
        })),
        Err(resp) => resp,
    }
}

/// POST /plan/validate
pub async fn plan_validate_handler(state: web::Data<AppState>, body: web::Json<serde_json::Value>) -> impl Responder {
    let (req, unresolved) = match parse_body(&state, body.into_inner()) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    let valid = validate_manual_selection(&state.catalog, &req.effective_history(), &req.selection);
    let accepted = codes(&valid);
    let rejected: Vec<&str> = req
        .selection
        .iter()
        .map(|s| s.as_str())
        .filter(|s| !accepted.contains(s))
        .collect();
    HttpResponse::Ok().json(json!({
        "valid": accepted,
        "rejected": rejected,
        "unresolved": unresolved,
        "generated_at": generated_at(),
    }))
}

/// POST /plan/graduation
pub async fn plan_graduation_handler(state: web::Data<AppState>, body: web::Json<serde_json::Value>) -> impl Responder {
    let (req, _unresolved) = match parse_body(&state, body.into_inner()) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    let catalog = state.catalog.clone();
    let mut opts = state.config.planner_options();
    if let Some(strategy) = req.strategy {
        opts.strategy = strategy;
    }
    let horizon = req.horizon.unwrap_or(state.config.default_horizon);
    let terms_per_year = opts.terms_per_year;

    let result = run_blocking(move || {
        predict_graduation_with(
            &catalog,
            &req.effective_history(),
            req.current_cycle,
            req.max_courses,
            horizon,
            &opts,
        )
    })
    .await;

    match result {
        Ok(cycle) => {
            // año académico relativo al ciclo 1
            let year = cycle.map(|c| (c - 1) / u32::from(terms_per_year) + 1);
            HttpResponse::Ok().json(json!({
                "graduation_cycle": cycle,
                "graduation_year": year,
                "generated_at": generated_at(),
            }))
        }
        Err(resp) => resp,
    }
}
