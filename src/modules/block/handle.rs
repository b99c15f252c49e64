use actix_web::{delete, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_extensions,
    modules::{
        account::repository_pg::AccountRepositoryPg,
        block::{model::BlockBody, repository_pg::BlockRepositoryPg, service::BlockService},
    },
    utils::{Claims, ValidatedJson},
};

pub type BlockSvc = BlockService<BlockRepositoryPg, AccountRepositoryPg>;

#[post("")]
pub async fn block_account(
    block_service: web::Data<BlockSvc>,
    body: ValidatedJson<BlockBody>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let caller_id = get_extensions::<Claims>(&req)?.sub;
    block_service.block_account(caller_id, body.0.account_id).await?;

    Ok(success::Success::created(None).message("User blocked successfully"))
}

#[delete("/{account_id}")]
pub async fn unblock_account(
    block_service: web::Data<BlockSvc>,
    account_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let caller_id = get_extensions::<Claims>(&req)?.sub;
    block_service.unblock_account(caller_id, *account_id).await?;

    Ok(success::Success::ok(None).message("User unblocked successfully"))
}
