use std::env;

/// Process configuration, read once at startup.
///
/// `DATABASE_URL` is mandatory; the bind address defaults to
/// `127.0.0.1:8080`. The JWT secret is read lazily by the token module
/// because tests swap it per case.
pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub server_host: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
        }
    }

    /// Host/port pair in the form `HttpServer::bind` expects.
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.server_host.as_str(), self.server_port)
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test, not several: the cases share process-wide env vars and would
    // race if run on parallel test threads.
    #[test]
    fn test_defaults_and_overrides() {
        env::remove_var("SERVER_PORT");
        env::remove_var("SERVER_HOST");
        env::set_var("DATABASE_URL", "postgres://localhost/todos_test");

        let config = Config::from_env();
        assert_eq!(config.database_url, "postgres://localhost/todos_test");
        assert_eq!(config.bind_addr(), ("127.0.0.1", 8080));
        assert_eq!(config.server_url(), "http://127.0.0.1:8080");

        env::set_var("SERVER_PORT", "9090");
        env::set_var("SERVER_HOST", "0.0.0.0");

        let config = Config::from_env();
        assert_eq!(config.bind_addr(), ("0.0.0.0", 9090));
        assert_eq!(config.server_url(), "http://0.0.0.0:9090");

        env::remove_var("SERVER_PORT");
        env::remove_var("SERVER_HOST");
    }
}
