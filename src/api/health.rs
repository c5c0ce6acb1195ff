use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, HealthResponse};

/// Liveness plus a cheap view of the node: chain height, pending pool and peer count.
#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        node_id: state.node_id.clone(),
        height: ledger.len(),
        pending: ledger.pending_len(),
        peers: ledger.nodes().len(),
    })
}
