//! Database schema and connection management

use crate::config::{DatabaseConfig, Endpoint};
use crate::{DatabaseError, Result};
use sqlx::any::AnyPoolOptions;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::{AnyPool, MySqlPool};
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// Database connection wrapper.
///
/// The pool is opened on first use and at most once; every caller shares it
/// through this value instead of process-wide state.
pub struct Database {
    config: DatabaseConfig,
    pool: OnceCell<Pool>,
}

/// The connection pool behind a [`Database`].
///
/// MySQL gets the native driver so every column type it returns can be
/// decoded; other URLs (SQLite in tests) go through `Any`.
#[derive(Debug, Clone)]
pub enum Pool {
    MySql(MySqlPool),
    Any(AnyPool),
}

impl Pool {
    /// Connections currently open, idle or in use
    pub fn size(&self) -> u32 {
        match self {
            Pool::MySql(pool) => pool.size(),
            Pool::Any(pool) => pool.size(),
        }
    }

    pub fn num_idle(&self) -> usize {
        match self {
            Pool::MySql(pool) => pool.num_idle(),
            Pool::Any(pool) => pool.num_idle(),
        }
    }

    async fn run(&self, sql: &str) -> std::result::Result<(), sqlx::Error> {
        match self {
            Pool::MySql(pool) => sqlx::query(sql).execute(pool).await.map(|_| ()),
            Pool::Any(pool) => sqlx::query(sql).execute(pool).await.map(|_| ()),
        }
    }
}

/// Result of a liveness check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionStatus {
    pub connected: bool,
    pub message: String,
}

impl ConnectionStatus {
    fn ok() -> Self {
        Self {
            connected: true,
            message: "Connection successful".to_string(),
        }
    }

    fn failed(err: impl ToString) -> Self {
        Self {
            connected: false,
            message: err.to_string(),
        }
    }
}

impl Database {
    /// Create a handle without connecting
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            pool: OnceCell::new(),
        }
    }

    /// Create a handle and open the pool right away
    pub async fn connect(config: DatabaseConfig) -> Result<Self> {
        let db = Self::new(config);
        db.initialize().await?;
        Ok(db)
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Open the pool if it is not open yet.
    ///
    /// Repeated calls reuse the existing pool. A failed attempt leaves the
    /// handle uninitialized so a later call can retry.
    pub async fn initialize(&self) -> Result<()> {
        self.pool().await.map(|_| ())
    }

    pub fn is_initialized(&self) -> bool {
        self.pool.initialized()
    }

    /// Get the connection pool, opening it on first use
    pub async fn pool(&self) -> Result<&Pool> {
        self.pool
            .get_or_try_init(|| open_pool(&self.config))
            .await
    }

    /// Round-trip a trivial query without touching any table
    pub async fn test_connection(&self) -> ConnectionStatus {
        let pool = match self.pool().await {
            Ok(pool) => pool,
            Err(e) => return ConnectionStatus::failed(e),
        };

        match pool.run("SELECT 1").await {
            Ok(()) => ConnectionStatus::ok(),
            Err(e) => {
                warn!("Connection test failed: {}", e);
                ConnectionStatus::failed(DatabaseError::from(e))
            }
        }
    }

    /// Drop the pool handle.
    ///
    /// Checked-out connections close when they come back; the next query
    /// opens a fresh pool.
    pub fn shutdown(&mut self) {
        if self.pool.take().is_some() {
            info!("Connection pool closed");
        }
    }

    /// Create any missing workshop tables
    pub async fn apply_schema(&self) -> Result<()> {
        let pool = self.pool().await?;

        for statement in SCHEMA.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            pool.run(statement)
                .await
                .map_err(|e| DatabaseError::Migration(e.to_string()))?;
        }

        info!("Workshop schema applied");
        Ok(())
    }
}

async fn open_pool(config: &DatabaseConfig) -> Result<Pool> {
    let opened = match config.endpoint()? {
        Endpoint::MySql(options) => MySqlPoolOptions::new()
            .max_connections(config.pool_size)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(options)
            .await
            .map(Pool::MySql),
        Endpoint::Any(options) => {
            sqlx::any::install_default_drivers();
            AnyPoolOptions::new()
                .max_connections(config.pool_size)
                .acquire_timeout(config.acquire_timeout)
                .connect_with(options)
                .await
                .map(Pool::Any)
        }
    };

    let pool = opened.map_err(|e| {
        warn!("Error while connecting to {}: {}", config.describe(), e);
        DatabaseError::connection(e)
    })?;

    info!(
        "Connection pool initialized: {} ({} connections)",
        config.describe(),
        config.pool_size
    );
    Ok(pool)
}

// Portable between MySQL and SQLite. Table and column casing is part of the
// row contract. Free text is VARCHAR: MySQL reports TEXT as a blob type.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS service_technician (
    technician_ID VARCHAR(10) NOT NULL PRIMARY KEY,
    Fname VARCHAR(50) NOT NULL,
    Name VARCHAR(50) NOT NULL,
    Trained_For VARCHAR(50),
    Specialization VARCHAR(50),
    YOE INT NOT NULL CHECK (YOE >= 0)
);

CREATE TABLE IF NOT EXISTS customer_reps (
    Employee_ID VARCHAR(10) NOT NULL PRIMARY KEY,
    Name VARCHAR(100) NOT NULL,
    Phone_Number BIGINT,
    YOE INT NOT NULL CHECK (YOE >= 0)
);

CREATE TABLE IF NOT EXISTS customers (
    Customer_ID VARCHAR(10) NOT NULL PRIMARY KEY,
    Name VARCHAR(100) NOT NULL,
    email_ID VARCHAR(100),
    Phone_no VARCHAR(15),
    license_No VARCHAR(20) NOT NULL,
    Age INT CHECK (Age >= 0),
    First_Joined DATE,
    empID VARCHAR(10),
    FOREIGN KEY (empID) REFERENCES customer_reps (Employee_ID) ON DELETE SET NULL
);

CREATE TABLE IF NOT EXISTS vehicle (
    Reg_No VARCHAR(15) NOT NULL PRIMARY KEY,
    Make VARCHAR(50) NOT NULL,
    Model VARCHAR(50) NOT NULL,
    Year INT,
    Chassis_No VARCHAR(20) NOT NULL UNIQUE,
    Body_type VARCHAR(30),
    CustomerID VARCHAR(10) NOT NULL,
    EmpID VARCHAR(10),
    FOREIGN KEY (CustomerID) REFERENCES customers (Customer_ID) ON DELETE CASCADE,
    FOREIGN KEY (EmpID) REFERENCES customer_reps (Employee_ID) ON DELETE SET NULL
);

CREATE TABLE IF NOT EXISTS Service_Job (
    Service_ID INT NOT NULL PRIMARY KEY,
    Start_Date DATE NOT NULL,
    Reg_No VARCHAR(15) NOT NULL,
    Service_type VARCHAR(50),
    Description VARCHAR(500),
    Predicted_End_date DATE,
    Predicted_Cost INT CHECK (Predicted_Cost >= 0),
    EmpID VARCHAR(10),
    FOREIGN KEY (Reg_No) REFERENCES vehicle (Reg_No) ON DELETE CASCADE,
    FOREIGN KEY (EmpID) REFERENCES customer_reps (Employee_ID) ON DELETE SET NULL
);

CREATE TABLE IF NOT EXISTS complaints (
    JobID INT NOT NULL,
    Complaints VARCHAR(500) NOT NULL,
    Fixed VARCHAR(100),
    FOREIGN KEY (JobID) REFERENCES Service_Job (Service_ID) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS parts (
    JobID INT NOT NULL,
    Part_No VARCHAR(20) NOT NULL,
    Quantity INT NOT NULL CHECK (Quantity > 0),
    Price INT NOT NULL CHECK (Price >= 0),
    PRIMARY KEY (JobID, Part_No),
    FOREIGN KEY (JobID) REFERENCES Service_Job (Service_ID) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS needs (
    RegNum VARCHAR(15) NOT NULL,
    JobID INT NOT NULL,
    PRIMARY KEY (RegNum, JobID),
    FOREIGN KEY (RegNum) REFERENCES vehicle (Reg_No) ON DELETE CASCADE,
    FOREIGN KEY (JobID) REFERENCES Service_Job (Service_ID) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS Done_By (
    JobID INT NOT NULL,
    TechID VARCHAR(10) NOT NULL,
    PRIMARY KEY (JobID, TechID),
    FOREIGN KEY (JobID) REFERENCES Service_Job (Service_ID) ON DELETE CASCADE,
    FOREIGN KEY (TechID) REFERENCES service_technician (technician_ID) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS assigns (
    JobID INT NOT NULL,
    EmpID VARCHAR(10) NOT NULL,
    TechID VARCHAR(10) NOT NULL,
    PRIMARY KEY (JobID, EmpID, TechID),
    FOREIGN KEY (JobID) REFERENCES Service_Job (Service_ID) ON DELETE CASCADE,
    FOREIGN KEY (EmpID) REFERENCES customer_reps (Employee_ID) ON DELETE CASCADE,
    FOREIGN KEY (TechID) REFERENCES service_technician (technician_ID) ON DELETE CASCADE
)
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_splits_into_ten_tables() {
        let statements: Vec<_> = SCHEMA
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        assert_eq!(statements.len(), 10);
        assert!(statements.iter().all(|s| s.starts_with("CREATE TABLE IF NOT EXISTS")));
        assert!(!SCHEMA.contains(" TEXT"));
    }

    #[test]
    fn new_handle_is_lazy() {
        let db = Database::new(DatabaseConfig::url("sqlite::memory:"));
        assert!(!db.is_initialized());
    }

    #[tokio::test]
    async fn shutdown_allows_reinitialize() {
        let mut db = Database::new(DatabaseConfig::url("sqlite::memory:").pool_size(1));
        db.initialize().await.unwrap();
        assert!(db.is_initialized());

        db.shutdown();
        assert!(!db.is_initialized());

        assert!(db.test_connection().await.connected);
        assert!(db.is_initialized());
    }
}
