pub mod create_booking;
mod delete_booking;
mod get_booking;
mod subscribers;
pub mod update_booking;

use actix_web::web;
use create_booking::create_booking_controller;
use delete_booking::delete_booking_controller;
use get_booking::get_booking_controller;
use update_booking::update_booking_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/bookings", web::post().to(create_booking_controller));
    cfg.route(
        "/bookings/{booking_id}",
        web::get().to(get_booking_controller),
    );
    cfg.route(
        "/bookings/{booking_id}",
        web::put().to(update_booking_controller),
    );
    cfg.route(
        "/bookings/{booking_id}",
        web::delete().to(delete_booking_controller),
    );
}
