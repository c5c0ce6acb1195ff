use actix_web::{HttpResponse, Responder, get, post, web};
use log::{debug, error};

use super::models::{AppState, NewTxRequest, NewTxResponse, PendingResponse};

/// Submit a new transaction into the pending pool. No validation is performed.
#[post("/transactions/new")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> impl Responder {
    let NewTxRequest {
        sender,
        recipient,
        amount,
    } = body.into_inner();

    let submitted = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        let index = ledger.new_transaction(sender, recipient, amount);
        debug!("POST /transactions/new - pool size now {}", ledger.pending_len());
        index
    };

    match submitted {
        Ok(index) => HttpResponse::Created().json(NewTxResponse {
            message: format!("Transaction will be added to Block {index}"),
            index,
        }),
        Err(e) => {
            error!("POST /transactions/new - {e}");
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}

/// List transactions waiting for the next block.
#[get("/transactions/pending")]
pub async fn get_pending(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    let pending = ledger.pending();
    HttpResponse::Ok().json(PendingResponse {
        size: pending.len(),
        transactions: pending.to_vec(),
    })
}
