use actix_web::{HttpResponse, Responder, get, web};
use log::{info, warn};

use super::models::{AppState, ErrorResponse, MineResponse};
use crate::ledger::LedgerError;

/// Mine one block from the pending pool. The proof-of-work search is
/// unbounded CPU work, so it runs on the blocking thread pool and never
/// stalls transaction ingestion or reads.
#[get("/mine")]
pub async fn mine_block(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.clone();
    match web::block(move || ledger.mine()).await {
        Ok(Ok(block)) => {
            info!("GET /mine sealed block #{}", block.index);
            HttpResponse::Ok().json(MineResponse::from(&block))
        }
        Ok(Err(err)) => {
            warn!("GET /mine rejected: {err}");
            let body = ErrorResponse::from(&err);
            match err {
                LedgerError::Busy | LedgerError::NotInitialized => {
                    HttpResponse::Conflict().json(body)
                }
                LedgerError::Cancelled => HttpResponse::ServiceUnavailable().json(body),
                _ => HttpResponse::BadRequest().json(body),
            }
        }
        Err(err) => {
            warn!("GET /mine blocking task failed: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
