use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::server::AppState;

/// GET /catalog
/// Lista la malla en orden topológico junto con el número de dependientes directos.
pub async fn catalog_handler(state: web::Data<AppState>) -> impl Responder {
    let catalog = &state.catalog;
    let courses: Vec<serde_json::Value> = catalog
        .topological_order()
        .into_iter()
        .map(|c| {
            let dependents = catalog.dependents_count(&c.code).unwrap_or(0);
            json!({"course": c, "dependents": dependents})
        })
        .collect();

    HttpResponse::Ok().json(json!({
        "catalog": state.config.catalog,
        "count": catalog.len(),
        "courses": courses,
    }))
}

/// GET /catalog/graph
/// Grafo de prerequisitos en formato DOT.
pub async fn catalog_graph_handler(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/vnd.graphviz; charset=utf-8")
        .body(state.catalog.to_dot())
}
