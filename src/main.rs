use actix_web::{
    self,
    middleware::{from_fn, Logger},
    web, App, HttpServer,
};
use std::sync::{Arc, LazyLock};

use crate::{
    configs::connect_database,
    middlewares::authentication,
    modules::{
        account::{repository_pg::AccountRepositoryPg, service::AccountService},
        activity::{repository_pg::ActivityRepositoryPg, service::ActivityService},
        block::{repository_pg::BlockRepositoryPg, service::BlockService},
        friendship::{repository_pg::FriendshipRepositoryPg, service::FriendshipService},
    },
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
#[cfg(test)]
mod test;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "Server is running"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let db_pool =
        connect_database().await.map_err(|_| std::io::Error::other("Database connection error"))?;

    sqlx::migrate!()
        .run(&db_pool)
        .await
        .map_err(|_| std::io::Error::other("Database migration error"))?;
    log::info!("Database migrations applied");

    let account_repo = Arc::new(AccountRepositoryPg::new(db_pool.clone()));
    let friendship_repo = Arc::new(FriendshipRepositoryPg::new(db_pool.clone()));
    let block_repo = Arc::new(BlockRepositoryPg::new(db_pool.clone()));
    let activity_repo = Arc::new(ActivityRepositoryPg::new(db_pool.clone()));

    let friendship_service = FriendshipService::with_dependencies(
        friendship_repo,
        block_repo.clone(),
        account_repo.clone(),
    );
    let block_service = BlockService::with_dependencies(block_repo.clone(), account_repo.clone());
    let account_service = AccountService::with_dependencies(account_repo, block_repo);
    let activity_service = ActivityService::with_dependencies(activity_repo);

    println!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        let cors = actix_cors::Cors::default()
            .allowed_origin(ENV.frontend_url.as_str())
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(friendship_service.clone()))
            .app_data(web::Data::new(block_service.clone()))
            .app_data(web::Data::new(account_service.clone()))
            .app_data(web::Data::new(activity_service.clone()))
            .service(health_check)
            .service(
                web::scope("/api")
                    .wrap(from_fn(authentication))
                    .configure(modules::friendship::route::configure)
                    .configure(modules::block::route::configure)
                    .configure(modules::account::route::configure)
                    .configure(modules::activity::route::configure),
            )
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(2)
    .run()
    .await
}
