mod create_customer;

use actix_web::web;
use create_customer::create_customer_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/customers", web::post().to(create_customer_controller));
}
