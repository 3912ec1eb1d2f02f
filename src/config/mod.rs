use std::env;

pub mod cors;
pub mod headers;

pub use cors::create_cors_layer;
pub use headers::security_header_layers;

pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Mail-relay settings, read from the environment once at startup and
/// injected into the `Mailer`. Required values are kept as `Option`s so a
/// partially provisioned process still starts; the gap surfaces as a relay
/// failure on the first send rather than a silent no-op.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: Option<String>,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: Option<String>,
}

impl SmtpConfig {
    pub fn from_env() -> Self {
        Self {
            host: non_empty_var("SMTP_HOST"),
            port: env::var("SMTP_PORT")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            username: non_empty_var("SMTP_USERNAME"),
            password: non_empty_var("SMTP_PASSWORD"),
            from: non_empty_var("SMTP_FROM"),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_defaults_to_587() {
        std::env::remove_var("SMTP_PORT");
        let config = SmtpConfig::from_env();
        assert_eq!(config.port, DEFAULT_SMTP_PORT);
    }

    #[test]
    fn test_from_env_tolerates_absent_values() {
        // Must not panic when nothing is provisioned.
        std::env::remove_var("SMTP_HOST");
        let config = SmtpConfig::from_env();
        assert!(config.host.is_none());
    }
}
