pub mod send_due_reminders;
pub mod sync_reminder_ledger;

use actix_web::web;
use send_due_reminders::send_due_reminders_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/reminders/dispatch",
        web::post().to(send_due_reminders_controller),
    );
}
