pub mod auth;
pub mod health;
pub mod todos;

use actix_web::web;

/// Registers the finite table of operation-to-handler mappings under `/api`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::login)
            .service(auth::register)
            .service(auth::change_password),
    )
    .service(
        web::scope("/todos")
            .service(todos::get_todos)
            .service(todos::create_todo)
            .service(todos::get_todo)
            .service(todos::update_todo)
            .service(todos::complete_todo)
            .service(todos::delete_todo),
    );
}
