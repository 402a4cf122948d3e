use std::net::TcpListener;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::http::header;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::configuration::Settings;
use crate::mail_relay::MailRelay;
use crate::routes::{health_check, json_error_handler, send_email};
use crate::templates::ContactTemplates;

/// The relay server, bound to its listener but not yet running.
pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let email_client = configuration.email_client.client()?;
        let mail_relay = MailRelay::new(email_client, ContactTemplates::new()?);

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        // the configured port may be 0, so read back the one the OS picked
        let port = listener.local_addr()?.port();
        let server = run(
            listener,
            mail_relay,
            configuration.application.allowed_origins,
        )?;
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
    mail_relay: MailRelay,
    allowed_origins: Vec<String>,
) -> Result<Server, std::io::Error> {
    // wrap in web::Data (an Arc) so every worker shares the one SMTP client
    let mail_relay = web::Data::new(mail_relay);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors(&allowed_origins))
            .wrap(TracingLogger::default())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route("/health_check", web::get().to(health_check))
            .route("/api/send-email", web::post().to(send_email))
            .app_data(mail_relay.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}

fn cors(allowed_origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600);
    if allowed_origins.is_empty() {
        cors.allow_any_origin()
    } else {
        allowed_origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}
