use crate::modules::block::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(scope("/blocks").service(block_account).service(unblock_account));
}
