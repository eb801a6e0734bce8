mod api;
mod ledger;

use std::env;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;

use api::AppState;
use ledger::Ledger;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080);
    let miner_address = env::var("MINER_ADDRESS").unwrap_or_else(|_| "miner-0".to_string());

    let ledger = Arc::new(Ledger::new(miner_address));
    ledger
        .initialize()
        .expect("fresh ledger initializes exactly once");

    println!("⛓️ Starting ledger API at http://{host}:{port}");

    let state = web::Data::new(AppState {
        ledger: ledger.clone(),
    });

    let result = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await;

    // Abort any proof search still running on the blocking pool.
    ledger.shutdown();
    result
}
