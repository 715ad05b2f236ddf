use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::configuration::Settings;
use crate::routes::{contact, health_check, unreadable_body};
use crate::submission_handler::ContactSubmissionHandler;

/// A bound, not yet running, contact relay server.
pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let channel = configuration.delivery.channel()?;
        let handler =
            ContactSubmissionHandler::new(channel, configuration.application.fallback_contact);

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        // port 0 asks the OS for a free port, so read back the real one
        let port = listener.local_addr()?.port();
        let server = run(listener, handler)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    handler: ContactSubmissionHandler,
) -> Result<Server, anyhow::Error> {
    let handler = web::Data::new(handler);
    let server = HttpServer::new(move || {
        // bodies that never become a `SubmissionRequest` still get a JSON result
        let json_handler = handler.clone();
        let form_handler = handler.clone();
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .route("/contact", web::post().to(contact))
            .app_data(handler.clone())
            .app_data(
                web::JsonConfig::default()
                    .error_handler(move |e, _req| unreadable_body(&json_handler, e)),
            )
            .app_data(
                web::FormConfig::default()
                    .error_handler(move |e, _req| unreadable_body(&form_handler, e)),
            )
    })
    .listen(listener)?
    .run();
    Ok(server)
}
