mod create_reminder;
mod create_reminder_log;
mod delete_reminder;
mod get_reminder_logs;
mod get_reminders;
pub mod scan_reminders;
mod snooze_reminder;
mod update_reminder;

use actix_web::web;
use create_reminder::create_reminder_controller;
use create_reminder_log::create_reminder_log_controller;
use delete_reminder::delete_reminder_controller;
use get_reminder_logs::get_reminder_logs_controller;
use get_reminders::get_reminders_controller;
use snooze_reminder::snooze_reminder_controller;
use update_reminder::update_reminder_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminders", web::get().to(get_reminders_controller));
    cfg.route("/reminders", web::post().to(create_reminder_controller));
    cfg.route(
        "/reminders/{reminder_id}",
        web::put().to(update_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}",
        web::delete().to(delete_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/snooze",
        web::patch().to(snooze_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/logs",
        web::post().to(create_reminder_log_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/logs",
        web::get().to(get_reminder_logs_controller),
    );
}
