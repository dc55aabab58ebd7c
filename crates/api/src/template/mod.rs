mod create_template;
mod delete_template;
mod get_template;
mod list_templates;
mod preview_template;
mod update_template;

use actix_web::web;
use create_template::create_template_controller;
use delete_template::delete_template_controller;
use get_template::get_template_controller;
use list_templates::list_templates_controller;
use preview_template::preview_template_controller;
use update_template::update_template_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/templates", web::post().to(create_template_controller));
    cfg.route("/templates", web::get().to(list_templates_controller));
    cfg.route(
        "/templates/{template_id}",
        web::get().to(get_template_controller),
    );
    cfg.route(
        "/templates/{template_id}",
        web::put().to(update_template_controller),
    );
    cfg.route(
        "/templates/{template_id}",
        web::delete().to(delete_template_controller),
    );
    cfg.route(
        "/templates/{template_id}/preview",
        web::post().to(preview_template_controller),
    );
}
