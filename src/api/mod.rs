mod chain;
mod health;
mod mining;
pub mod models;
mod tx;

use actix_web::web::ServiceConfig;

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(health::health_check)
        .service(tx::post_transaction)
        .service(tx::get_pool)
        .service(mining::mine_block)
        .service(chain::get_chain)
        .service(chain::validate_chain);
}
