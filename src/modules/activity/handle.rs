use actix_web::{get, web, HttpRequest};

use crate::{
    api::{error, success},
    middlewares::get_extensions,
    modules::activity::{
        model::ActivityResponse, repository_pg::ActivityRepositoryPg, service::ActivityService,
    },
    utils::Claims,
};

pub type ActivitySvc = ActivityService<ActivityRepositoryPg>;

#[get("/")]
pub async fn list_activity(
    activity_service: web::Data<ActivitySvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<ActivityResponse>>, error::Error> {
    let caller_id = get_extensions::<Claims>(&req)?.sub;
    let entries = activity_service.activity_of(caller_id).await?;

    Ok(success::Success::ok(Some(entries)).message("Activity retrieved successfully"))
}
