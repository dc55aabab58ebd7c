mod create_tenant;
mod get_tenant;

use actix_web::web;
use create_tenant::create_tenant_controller;
use get_tenant::get_tenant_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/tenants", web::post().to(create_tenant_controller));
    cfg.route("/tenants/{tenant_id}", web::get().to(get_tenant_controller));
}
