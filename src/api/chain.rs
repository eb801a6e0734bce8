use actix_web::{HttpResponse, Responder, get, web};
use log::warn;

use super::models::{AppState, ChainResponse, ValidateResponse};
use crate::ledger::LedgerError;

/// Get the full chain.
#[get("/chain")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let chain = state.ledger.blocks();
    HttpResponse::Ok().json(ChainResponse {
        length: chain.len(),
        chain,
    })
}

/// Validate the whole chain. Always 200: validation reports, it never fails
/// the request.
#[get("/validate")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let resp = match state.ledger.validate() {
        Ok(length) => ValidateResponse {
            valid: true,
            length,
            failed_index: None,
        },
        Err(LedgerError::ValidationFailure { index }) => {
            warn!("chain integrity broken at block {index}");
            ValidateResponse {
                valid: false,
                length: state.ledger.height(),
                failed_index: Some(index),
            }
        }
        Err(err) => {
            warn!("chain validation error: {err}");
            ValidateResponse {
                valid: false,
                length: state.ledger.height(),
                failed_index: None,
            }
        }
    };
    HttpResponse::Ok().json(resp)
}
