mod create_booking;
mod get_booking;
mod get_booking_jobs;
pub mod subscribers;

use actix_web::web;
use create_booking::create_booking_controller;
use get_booking::get_booking_controller;
use get_booking_jobs::get_booking_jobs_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/bookings", web::post().to(create_booking_controller));
    cfg.route(
        "/bookings/{booking_id}",
        web::get().to(get_booking_controller),
    );
    cfg.route(
        "/bookings/{booking_id}/jobs",
        web::get().to(get_booking_jobs_controller),
    );
}
