use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

/// Material intake form server.
///
/// Every option can also be given through the environment, which is the
/// expected place for the SMTP password.
#[derive(Parser, Debug, Clone)]
#[command(name = "material-intake", version, about)]
pub struct Config {
    /// Address the HTTP server listens on.
    #[arg(long, env = "INTAKE_LISTEN", default_value = "127.0.0.1:5000")]
    pub listen: SocketAddr,

    /// SQLite database file, created on first start.
    #[arg(long, env = "INTAKE_DATABASE", default_value = "intake.sqlite3")]
    pub database: PathBuf,

    #[arg(long, env = "INTAKE_SMTP_HOST", default_value = "smtp.gmail.com")]
    pub smtp_host: String,

    #[arg(long, env = "INTAKE_SMTP_PORT", default_value_t = 587)]
    pub smtp_port: u16,

    #[arg(long, env = "INTAKE_SMTP_USERNAME")]
    pub smtp_username: Option<String>,

    #[arg(long, env = "INTAKE_SMTP_PASSWORD", hide_env_values = true)]
    pub smtp_password: Option<String>,

    /// Sender address; defaults to the SMTP username.
    #[arg(long, env = "INTAKE_MAIL_FROM")]
    pub mail_from: Option<String>,

    /// Recipient of submission notifications.
    #[arg(long, env = "INTAKE_MAIL_TO")]
    pub mail_to: Option<String>,
}

/// Everything the SMTP notifier needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    pub to: String,
}

impl Config {
    /// Mail settings, or `None` unless username, password and recipient are
    /// all configured.
    pub fn mail(&self) -> Option<MailSettings> {
        let username = self.smtp_username.clone()?;
        let password = self.smtp_password.clone()?;
        let to = self.mail_to.clone()?;
        let from = self.mail_from.clone().unwrap_or_else(|| username.clone());

        Some(MailSettings {
            host: self.smtp_host.clone(),
            port: self.smtp_port,
            username,
            password,
            from,
            to,
        })
    }
}
