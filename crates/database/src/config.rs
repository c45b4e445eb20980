//! Connection settings

use crate::{DatabaseError, Result};
use sqlx::any::AnyConnectOptions;
use sqlx::mysql::MySqlConnectOptions;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Bounded pool size used by the workshop deployment.
pub const DEFAULT_POOL_SIZE: u32 = 5;

const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// MySQL login details. The password is held only in memory.
#[derive(Clone)]
pub struct Credentials {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

impl Credentials {
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: 3306,
            username: username.into(),
            password: password.into(),
            database: database.into(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

/// Where the pool connects to.
#[derive(Debug, Clone)]
pub enum Target {
    /// A MySQL server addressed by credentials
    MySql(Credentials),
    /// Any URL the sqlx `Any` driver understands (`sqlite://...`, `mysql://...`)
    Url(String),
}

/// Pool configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub target: Target,
    pub pool_size: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    pub fn mysql(credentials: Credentials) -> Self {
        Self::with_target(Target::MySql(credentials))
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self::with_target(Target::Url(url.into()))
    }

    fn with_target(target: Target) -> Self {
        Self {
            target,
            pool_size: DEFAULT_POOL_SIZE,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }

    pub fn pool_size(mut self, size: u32) -> Self {
        self.pool_size = size.max(1);
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Human-readable target without secrets, for logs and status lines.
    pub fn describe(&self) -> String {
        match &self.target {
            Target::MySql(c) => format!("mysql://{}@{}:{}/{}", c.username, c.host, c.port, c.database),
            Target::Url(url) => match url.rsplit_once('@') {
                Some((scheme_and_user, rest)) => {
                    let scheme = scheme_and_user.split("://").next().unwrap_or("db");
                    format!("{}://***@{}", scheme, rest)
                }
                None => url.clone(),
            },
        }
    }

    /// Resolve the driver options. MySQL targets, whether given as
    /// credentials or as a `mysql://` URL, use the native driver; every other
    /// URL goes through the `Any` backend.
    pub(crate) fn endpoint(&self) -> Result<Endpoint> {
        match &self.target {
            Target::MySql(c) => Ok(Endpoint::MySql(
                MySqlConnectOptions::new()
                    .host(&c.host)
                    .port(c.port)
                    .username(&c.username)
                    .password(&c.password)
                    .database(&c.database),
            )),
            Target::Url(url) if is_mysql_url(url) => MySqlConnectOptions::from_str(url)
                .map(Endpoint::MySql)
                .map_err(DatabaseError::connection),
            Target::Url(url) => AnyConnectOptions::from_str(url)
                .map(Endpoint::Any)
                .map_err(DatabaseError::connection),
        }
    }
}

/// Driver-level connect options for one target
#[derive(Debug, Clone)]
pub(crate) enum Endpoint {
    MySql(MySqlConnectOptions),
    Any(AnyConnectOptions),
}

fn is_mysql_url(url: &str) -> bool {
    let scheme = url.split(':').next().unwrap_or_default();
    scheme.eq_ignore_ascii_case("mysql") || scheme.eq_ignore_ascii_case("mariadb")
}
