use actix_web::{HttpResponse, Responder, get, web};
use log::error;

use super::models::{AppState, MineResponse, ValidateResponse};
use crate::blockchain::miner;

/// Get the full chain; this is also what peers fetch during resolution.
#[get("/chain")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let snapshot = {
        let ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.snapshot()
    };
    HttpResponse::Ok().json(snapshot)
}

/// Validate the whole local chain.
#[get("/validate")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ValidateResponse {
        valid: ledger.is_valid(),
        length: ledger.len(),
    })
}

/// Mine one block from the pending pool, paying the reward to this node.
/// The proof search runs on the blocking pool, outside the ledger lock.
#[get("/mine")]
pub async fn mine_block(state: web::Data<AppState>) -> impl Responder {
    let worker = state.clone();
    let mined =
        web::block(move || miner::mine(&worker.ledger, Some(worker.node_id.as_str()))).await;

    match mined {
        Ok(Ok(block)) => HttpResponse::Ok().json(MineResponse::from(block)),
        Ok(Err(e)) => {
            error!("MINER - failed: {e}");
            HttpResponse::InternalServerError().body(e.to_string())
        }
        Err(e) => {
            error!("MINER - blocking task failed: {e}");
            HttpResponse::InternalServerError().body("mining task failed")
        }
    }
}
