//! Database query functions, grouped by the role that issues them

mod customer;
mod manager;
mod representative;
mod technician;

use crate::executor::{QueryMode, Value};
use crate::schema::Database;
use crate::Result;

impl Database {
    /// Run a write statement and report how many rows it touched
    async fn write(&self, sql: &str, params: &[Value]) -> Result<u64> {
        let outcome = self.execute(sql, params, QueryMode::Write).await?;
        Ok(outcome.rows_affected())
    }
}
