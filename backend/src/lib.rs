pub mod catchers;
pub mod config;
pub mod cors;
pub mod error;
pub mod queries;
pub mod routes;

use rocket::{Build, Rocket, catchers, routes};
use crate::{
    catchers::{bad_request, internal_error, not_found, unprocessable_entity},
    config::ServerConfig,
    cors::CORS,
    routes::*,
};

/// Routes, catchers and CORS. The caller manages `AppState`.
pub fn build_rocket(config: ServerConfig) -> Rocket<Build> {
    rocket::build()
        .attach(CORS::new(config))
        .mount(
            "/",
            routes![
                index,
                all_options,
                create_client,
                read_clients,
                read_client,
                patch_client,
                delete_client,
                create_project,
                read_projects,
                read_project,
                patch_project,
                delete_project,
                create_task,
                read_tasks,
                read_task,
                patch_task,
                delete_task,
            ],
        )
        .register(
            "/",
            catchers![
                bad_request,
                not_found,
                unprocessable_entity,
                internal_error
            ],
        )
}

#[cfg(test)]
mod tests;
