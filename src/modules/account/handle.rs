use actix_web::{get, web, HttpRequest};

use crate::{
    api::{error, success},
    middlewares::get_extensions,
    modules::{
        account::{
            model::{AccountResponse, SearchQuery},
            repository_pg::AccountRepositoryPg,
            service::AccountService,
        },
        block::repository_pg::BlockRepositoryPg,
    },
    utils::Claims,
};

pub type AccountSvc = AccountService<AccountRepositoryPg, BlockRepositoryPg>;

#[get("/search")]
pub async fn search_accounts(
    account_service: web::Data<AccountSvc>,
    query: web::Query<SearchQuery>,
    req: HttpRequest,
) -> Result<success::Success<Vec<AccountResponse>>, error::Error> {
    let caller_id = get_extensions::<Claims>(&req)?.sub;
    let accounts = account_service
        .search_accounts(caller_id, query.query.as_deref().unwrap_or_default())
        .await?;

    Ok(success::Success::ok(Some(accounts)).message("Accounts retrieved successfully"))
}
