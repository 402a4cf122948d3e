use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use portfolio_contact::configuration::{get_configuration, Settings, SmtpSecurity};
use portfolio_contact::startup::Application;
use portfolio_contact::telemetry::{get_tracing_subscriber, init_subscriber};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

// ensure that the tracing stack is only initialized once
static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_tracing_subscriber("test", "debug", std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_tracing_subscriber("test", "debug", std::io::sink);
        init_subscriber(subscriber);
    }
});

// A struct holding data needed to access a test version of our application
pub struct TestApp {
    pub address: String,
    pub smtp_server: FakeSmtpServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_send_email<Body: serde::Serialize>(&self, body: &Body) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/api/send-email", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_raw_send_email(&self, body: &'static str) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/api/send-email", &self.address))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

// Spawns the relay on a random port, talking to a fresh fake SMTP server.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

// Same as `spawn_app`, with a chance to tweak the configuration before the app is built.
pub async fn spawn_app_with(customise: impl FnOnce(&mut Settings)) -> TestApp {
    Lazy::force(&TRACING);

    let smtp_server = FakeSmtpServer::start().await;

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        // port 0 lets the OS pick a free port
        c.application.port = 0;
        c.email_client.smtp_host = "127.0.0.1".into();
        c.email_client.smtp_port = smtp_server.port;
        c.email_client.smtp_security = SmtpSecurity::None;
        c.email_client.recipient_email = None;
        c.email_client.timeout_milliseconds = 2_000;
        customise(&mut c);
        c
    };

    let application = Application::build(configuration)
        .await
        .expect("Failed to build application.");
    let port = application.port();
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        smtp_server,
        api_client: reqwest::Client::new(),
    }
}

/// A local port with nothing listening on it.
pub fn unused_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind a random port");
    listener.local_addr().unwrap().port()
}

#[derive(Debug, Clone, Default)]
pub struct ReceivedEmail {
    pub mail_from: String,
    pub rcpt_to: Vec<String>,
    pub data: String,
}

/// Just enough of an SMTP server to accept messages from lettre over plain text
/// and keep them for inspection.
pub struct FakeSmtpServer {
    pub port: u16,
    received: Arc<Mutex<Vec<ReceivedEmail>>>,
}

impl FakeSmtpServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind the fake SMTP server");
        let port = listener.local_addr().unwrap().port();
        let received = Arc::new(Mutex::new(Vec::new()));

        let store = Arc::clone(&received);
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                tokio::spawn(handle_session(socket, Arc::clone(&store)));
            }
        });

        Self { port, received }
    }

    pub fn received(&self) -> Vec<ReceivedEmail> {
        self.received.lock().unwrap().clone()
    }
}

async fn handle_session(
    socket: TcpStream,
    store: Arc<Mutex<Vec<ReceivedEmail>>>,
) -> std::io::Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut lines = BufReader::new(reader).lines();
    let mut current = ReceivedEmail::default();

    writer.write_all(b"220 localhost ESMTP fake\r\n").await?;
    while let Some(line) = lines.next_line().await? {
        let command = line.to_ascii_uppercase();
        if command.starts_with("EHLO") || command.starts_with("HELO") {
            writer
                .write_all(b"250-localhost\r\n250 AUTH PLAIN LOGIN\r\n")
                .await?;
        } else if command.starts_with("AUTH") {
            writer.write_all(b"235 2.7.0 Authentication successful\r\n").await?;
        } else if command.starts_with("MAIL FROM:") {
            current.mail_from = address_argument(&line);
            writer.write_all(b"250 2.1.0 Ok\r\n").await?;
        } else if command.starts_with("RCPT TO:") {
            current.rcpt_to.push(address_argument(&line));
            writer.write_all(b"250 2.1.5 Ok\r\n").await?;
        } else if command == "DATA" {
            writer
                .write_all(b"354 End data with <CR><LF>.<CR><LF>\r\n")
                .await?;
            while let Some(line) = lines.next_line().await? {
                if line == "." {
                    break;
                }
                current.data.push_str(&line);
                current.data.push('\n');
            }
            store.lock().unwrap().push(std::mem::take(&mut current));
            writer.write_all(b"250 2.0.0 Ok: queued\r\n").await?;
        } else if command == "QUIT" {
            writer.write_all(b"221 2.0.0 Bye\r\n").await?;
            break;
        } else {
            // RSET, NOOP and friends
            writer.write_all(b"250 2.0.0 Ok\r\n").await?;
        }
    }
    Ok(())
}

// `MAIL FROM:<a@b.co> SIZE=123` -> `a@b.co`
fn address_argument(line: &str) -> String {
    line.split_once('<')
        .and_then(|(_, rest)| rest.split_once('>'))
        .map(|(address, _)| address.to_owned())
        .unwrap_or_default()
}
