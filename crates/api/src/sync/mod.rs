mod bulk_sync;

use actix_web::web;
use bulk_sync::bulk_sync_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/sync/bulk", web::post().to(bulk_sync_controller));
}
