mod caregiver;
mod error;
mod job_schedulers;
mod notification;
mod realtime;
mod reminder;
mod shared;
mod status;
mod sync;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use job_schedulers::{start_reminder_job, ReminderJobHandle};
use sehat_saathi_infra::SehatContext;
use std::net::TcpListener;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub use error::SehatError;
pub use job_schedulers::run_reminder_scan;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    caregiver::configure_routes(cfg);
    notification::configure_routes(cfg);
    reminder::configure_routes(cfg);
    sync::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
    reminder_job: ReminderJobHandle,
}

impl Application {
    pub async fn new(context: SehatContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        let reminder_job = start_reminder_job(context);

        Ok(Self {
            server,
            port,
            reminder_job,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    async fn configure_server(context: SehatContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();
        info!("Sehat Saathi listening on port: {}", port);

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .configure(status::configure_routes)
                .configure(realtime::configure_routes)
                .service(web::scope("/api").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    /// Serves requests until the server is shut down, then stops the
    /// reminder job. The room registries go away with the context.
    pub async fn start(self) -> Result<(), std::io::Error> {
        let res = self.server.await;
        self.reminder_job.stop();
        res
    }
}
