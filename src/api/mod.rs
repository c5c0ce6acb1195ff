mod chain;
mod health;
pub mod models;
mod nodes;
mod tx;

use actix_web::web::ServiceConfig;

pub use models::AppState;

/// Routes live at the root: peers fetch `/chain` from each other directly.
pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(health::health_check)
        .service(chain::get_chain)
        .service(chain::validate_chain)
        .service(chain::mine_block)
        .service(tx::post_transaction)
        .service(tx::get_pending)
        .service(nodes::register_nodes)
        .service(nodes::resolve_conflicts);
}
