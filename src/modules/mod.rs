pub mod account {
    pub mod handle;
    pub mod model;
    pub mod repository;
    pub mod repository_pg;
    pub mod route;
    pub mod schema;
    pub mod service;
}

pub mod activity {
    pub mod handle;
    pub mod model;
    pub mod repository;
    pub mod repository_pg;
    pub mod route;
    pub mod schema;
    pub mod service;
}

pub mod block {
    pub mod handle;
    pub mod model;
    pub mod repository;
    pub mod repository_pg;
    pub mod route;
    pub mod schema;
    pub mod service;
}

pub mod friendship {
    pub mod handle;
    pub mod model;
    pub mod repository;
    pub mod repository_pg;
    pub mod route;
    pub mod schema;
    pub mod service;
}
