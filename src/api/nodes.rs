use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};

use super::models::{AppState, RegisterNodesRequest, RegisterNodesResponse, ResolveResponse};

/// Register peer nodes: `{"nodes": ["127.0.0.1:5001", ...]}`.
#[post("/nodes/register")]
pub async fn register_nodes(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodesRequest>,
) -> impl Responder {
    let nodes = match body.into_inner().nodes {
        Some(nodes) if !nodes.is_empty() => nodes,
        _ => {
            return HttpResponse::BadRequest().body("Error: Please supply a valid list of nodes");
        }
    };

    let mut ledger = state.ledger.lock().expect("mutex poisoned");
    match ledger.register_nodes(&nodes) {
        Ok(added) => info!(
            "NODES - registered {:?} ({} peers known)",
            added,
            ledger.nodes().len()
        ),
        Err(e) => {
            warn!("NODES - rejected batch {nodes:?}: {e}");
            return HttpResponse::BadRequest().body(e.to_string());
        }
    }

    HttpResponse::Created().json(RegisterNodesResponse {
        message: "New nodes have been added".to_string(),
        total_nodes: ledger.nodes().to_vec(),
    })
}

/// Run the longest-valid-chain rule against every registered peer.
#[get("/nodes/resolve")]
pub async fn resolve_conflicts(state: web::Data<AppState>) -> impl Responder {
    let outcome = state.resolver.resolve(&state.ledger).await;
    let message = if outcome.replaced {
        "Our chain was replaced"
    } else {
        "Our chain is authoritative"
    };

    HttpResponse::Ok().json(ResolveResponse {
        message: message.to_string(),
        replaced: outcome.replaced,
        chain: outcome.chain,
    })
}
