use actix_web::{web, HttpResponse};
use chrono::{DateTime, SecondsFormat, Utc};
use sehat_saathi_api_structs::get_service_health::*;
use sehat_saathi_infra::SehatContext;

async fn status(ctx: web::Data<SehatContext>) -> HttpResponse {
    let timestamp = DateTime::<Utc>::from_timestamp_millis(ctx.sys.get_timestamp_millis())
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true);

    HttpResponse::Ok().json(APIResponse {
        status: "OK".into(),
        message: "Sehat Saathi API is running".into(),
        timestamp,
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(status));
}
