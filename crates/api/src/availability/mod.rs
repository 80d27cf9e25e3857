mod check_availability;
mod check_availability_batch;

use actix_web::web;
use check_availability::check_availability_controller;
use check_availability_batch::check_availability_batch_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/availability",
        web::get().to(check_availability_controller),
    );
    cfg.route(
        "/availability/batch",
        web::post().to(check_availability_batch_controller),
    );
}
