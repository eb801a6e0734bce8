use actix_web::{HttpResponse, Responder, get, post, web};
use log::{debug, warn};

use super::models::{AppState, ErrorResponse, PoolResponse, SubmitResponse};

/// Submit a raw transaction payload into the pending pool. The body is
/// handed to the ledger as-is; structural decoding (and rejection) happens
/// there, so a malformed payload never touches pool state.
#[post("/transaction")]
pub async fn post_transaction(state: web::Data<AppState>, body: web::Bytes) -> impl Responder {
    match state.ledger.submit_transaction(&body) {
        Ok(pending) => {
            debug!("POST /transaction accepted ({pending} pending)");
            HttpResponse::Ok().json(SubmitResponse {
                accepted: true,
                pending,
            })
        }
        Err(err) => {
            warn!("POST /transaction rejected: {err}");
            HttpResponse::BadRequest().json(ErrorResponse::from(&err))
        }
    }
}

/// Snapshot of the pending pool.
#[get("/pool")]
pub async fn get_pool(state: web::Data<AppState>) -> impl Responder {
    let transactions = state.ledger.pending_transactions();
    HttpResponse::Ok().json(PoolResponse {
        size: transactions.len(),
        transactions,
    })
}
