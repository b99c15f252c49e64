use actix_web::{get, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_extensions,
    modules::{
        account::{model::AccountResponse, repository_pg::AccountRepositoryPg},
        block::repository_pg::BlockRepositoryPg,
        friendship::{
            model::{FriendRequestBody, PendingRequestResponse},
            repository_pg::FriendshipRepositoryPg,
            schema::FriendshipEntity,
            service::FriendshipService,
        },
    },
    utils::{Claims, ValidatedJson},
};

pub type FriendshipSvc =
    FriendshipService<FriendshipRepositoryPg, BlockRepositoryPg, AccountRepositoryPg>;

#[post("/requests")]
pub async fn send_friend_request(
    friendship_service: web::Data<FriendshipSvc>,
    body: ValidatedJson<FriendRequestBody>,
    req: HttpRequest,
) -> Result<success::Success<FriendshipEntity>, error::Error> {
    let sender_id = get_extensions::<Claims>(&req)?.sub;
    let request = friendship_service.send_request(sender_id, body.0.recipient_id).await?;

    Ok(success::Success::created(Some(request)).message("Friend request sent"))
}

#[post("/requests/{sender_id}/accept")]
pub async fn accept_friend_request(
    friendship_service: web::Data<FriendshipSvc>,
    sender_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<AccountResponse>, error::Error> {
    let responder_id = get_extensions::<Claims>(&req)?.sub;
    let sender = friendship_service.accept_request(responder_id, *sender_id).await?;

    Ok(success::Success::ok(Some(sender)).message("Friend request accepted"))
}

#[post("/requests/{sender_id}/reject")]
pub async fn reject_friend_request(
    friendship_service: web::Data<FriendshipSvc>,
    sender_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let responder_id = get_extensions::<Claims>(&req)?.sub;
    friendship_service.reject_request(responder_id, *sender_id).await?;

    Ok(success::Success::ok(None)
        .message("Friend request rejected. Sender cannot resend for 24 hours."))
}

#[get("/")]
pub async fn list_friends(
    friendship_service: web::Data<FriendshipSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<AccountResponse>>, error::Error> {
    let caller_id = get_extensions::<Claims>(&req)?.sub;
    let friends = friendship_service.friends_of(caller_id).await?;

    Ok(success::Success::ok(Some(friends)).message("Friends retrieved successfully"))
}

#[get("/requests")]
pub async fn list_friend_requests(
    friendship_service: web::Data<FriendshipSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<PendingRequestResponse>>, error::Error> {
    let caller_id = get_extensions::<Claims>(&req)?.sub;
    let requests = friendship_service.pending_requests(caller_id).await?;

    Ok(success::Success::ok(Some(requests)).message("Friend requests retrieved successfully"))
}
