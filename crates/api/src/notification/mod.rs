mod count_due_jobs;
pub(crate) mod emit_notifications;
mod get_job;
mod list_jobs;
pub(crate) mod process_due_jobs;

use actix_web::web;
use count_due_jobs::count_due_jobs_controller;
use emit_notifications::emit_notifications_controller;
use get_job::get_job_controller;
use list_jobs::list_jobs_controller;
use process_due_jobs::process_due_jobs_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/notifications/emit",
        web::post().to(emit_notifications_controller),
    );
    cfg.route(
        "/notifications/process-due",
        web::post().to(process_due_jobs_controller),
    );
    cfg.route("/notifications/jobs", web::get().to(list_jobs_controller));
    cfg.route(
        "/notifications/jobs/due/count",
        web::get().to(count_due_jobs_controller),
    );
    cfg.route(
        "/notifications/jobs/{job_id}",
        web::get().to(get_job_controller),
    );
}
