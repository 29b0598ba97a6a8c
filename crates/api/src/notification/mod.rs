mod clear_notifications;
mod get_notifications;
mod mark_all_notifications_read;
mod mark_notification_read;
pub mod send_notification;

use actix_web::web;
use clear_notifications::clear_notifications_controller;
use get_notifications::get_notifications_controller;
use mark_all_notifications_read::mark_all_notifications_read_controller;
use mark_notification_read::mark_notification_read_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/notifications",
        web::get().to(get_notifications_controller),
    );
    cfg.route(
        "/notifications",
        web::delete().to(clear_notifications_controller),
    );
    cfg.route(
        "/notifications/read-all",
        web::put().to(mark_all_notifications_read_controller),
    );
    cfg.route(
        "/notifications/{notification_id}/read",
        web::put().to(mark_notification_read_controller),
    );
}
