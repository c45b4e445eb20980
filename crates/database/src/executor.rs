//! Generic statement execution

use crate::schema::{Database, Pool};
use crate::{DatabaseError, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use sqlx::any::{AnyArguments, AnyRow};
use sqlx::mysql::{MySqlArguments, MySqlColumn, MySqlRow};
use sqlx::{Arguments, Column, Encode, FromRow, Row as _, Transaction, Type, TypeInfo};
use tracing::{debug, warn};

/// A single column value, used both for bound parameters and fetched cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Bytes(Vec<u8>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
            Value::Bytes(v) => write!(f, "<{} bytes>", v.len()),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// One result row: column names in select order, matched case-sensitively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: Vec<(String, Value)>,
}

impl Row {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn from_any(row: &AnyRow) -> std::result::Result<Self, sqlx::Error> {
        let mut fields = Vec::with_capacity(row.columns().len());
        for column in row.columns() {
            let value = decode_cell(row, column.ordinal())?;
            fields.push((column.name().to_string(), value));
        }
        Ok(Self { fields })
    }

    fn from_mysql(row: &MySqlRow) -> std::result::Result<Self, sqlx::Error> {
        let mut fields = Vec::with_capacity(row.columns().len());
        for column in row.columns() {
            let value = decode_mysql_cell(row, column)?;
            fields.push((column.name().to_string(), value));
        }
        Ok(Self { fields })
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// The Any driver only carries a handful of primitive kinds, so try them in
// order; NULL decodes successfully on the first attempt.
fn decode_cell(row: &AnyRow, index: usize) -> std::result::Result<Value, sqlx::Error> {
    if let Ok(v) = row.try_get::<Option<i64>, _>(index) {
        return Ok(v.map_or(Value::Null, Value::Int));
    }
    if let Ok(v) = row.try_get::<Option<f64>, _>(index) {
        return Ok(v.map_or(Value::Null, Value::Float));
    }
    if let Ok(v) = row.try_get::<Option<bool>, _>(index) {
        return Ok(v.map_or(Value::Null, Value::Bool));
    }
    if let Ok(v) = row.try_get::<Option<String>, _>(index) {
        return Ok(v.map_or(Value::Null, Value::Text));
    }
    row.try_get::<Option<Vec<u8>>, _>(index)
        .map(|v| v.map_or(Value::Null, bytes_value))
}

// MySQL columns decode natively. Dates and times become ISO text; DECIMAL
// stays text to keep its precision.
fn decode_mysql_cell(row: &MySqlRow, column: &MySqlColumn) -> std::result::Result<Value, sqlx::Error> {
    let index = column.ordinal();

    match column.type_info().name() {
        "DECIMAL" => {
            return row
                .try_get_unchecked::<Option<String>, _>(index)
                .map(|v| v.map_or(Value::Null, Value::Text))
        }
        "YEAR" => {
            return row
                .try_get_unchecked::<Option<i64>, _>(index)
                .map(|v| v.map_or(Value::Null, Value::Int))
        }
        _ => {}
    }

    if let Ok(v) = row.try_get::<Option<i64>, _>(index) {
        return Ok(v.map_or(Value::Null, Value::Int));
    }
    if let Ok(v) = row.try_get::<Option<u64>, _>(index) {
        return Ok(v.map_or(Value::Null, |n| match i64::try_from(n) {
            Ok(n) => Value::Int(n),
            Err(_) => Value::Text(n.to_string()),
        }));
    }
    if let Ok(v) = row.try_get::<Option<f64>, _>(index) {
        return Ok(v.map_or(Value::Null, Value::Float));
    }
    if let Ok(v) = row.try_get::<Option<NaiveDate>, _>(index) {
        return Ok(v.map_or(Value::Null, |d| Value::Text(d.format("%Y-%m-%d").to_string())));
    }
    if let Ok(v) = row.try_get::<Option<NaiveDateTime>, _>(index) {
        return Ok(v.map_or(Value::Null, |d| {
            Value::Text(d.format("%Y-%m-%d %H:%M:%S").to_string())
        }));
    }
    if let Ok(v) = row.try_get::<Option<NaiveTime>, _>(index) {
        return Ok(v.map_or(Value::Null, |t| Value::Text(t.format("%H:%M:%S").to_string())));
    }
    if let Ok(v) = row.try_get::<Option<String>, _>(index) {
        return Ok(v.map_or(Value::Null, Value::Text));
    }
    row.try_get_unchecked::<Option<Vec<u8>>, _>(index)
        .map(|v| v.map_or(Value::Null, bytes_value))
}

// Text that arrives as bytes (TEXT columns, CAST results) is still text.
fn bytes_value(bytes: Vec<u8>) -> Value {
    match String::from_utf8(bytes) {
        Ok(text) => Value::Text(text),
        Err(e) => Value::Bytes(e.into_bytes()),
    }
}

/// Whether the caller expects rows back or only a success signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    Fetch,
    Write,
}

/// Successful result of [`Database::execute`].
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Rows(Vec<Row>),
    /// The statement committed. Zero affected rows still counts as success.
    Done { rows_affected: u64 },
}

impl QueryOutcome {
    pub fn rows(self) -> Vec<Row> {
        match self {
            QueryOutcome::Rows(rows) => rows,
            QueryOutcome::Done { .. } => Vec::new(),
        }
    }

    pub fn rows_affected(&self) -> u64 {
        match self {
            QueryOutcome::Rows(rows) => rows.len() as u64,
            QueryOutcome::Done { rows_affected } => *rows_affected,
        }
    }
}

pub(crate) fn arguments<'q, A>(params: &[Value]) -> Result<A>
where
    A: Arguments<'q>,
    Option<String>: Encode<'q, A::Database> + Type<A::Database>,
    i64: Encode<'q, A::Database> + Type<A::Database>,
    f64: Encode<'q, A::Database> + Type<A::Database>,
    bool: Encode<'q, A::Database> + Type<A::Database>,
    String: Encode<'q, A::Database> + Type<A::Database>,
    Vec<u8>: Encode<'q, A::Database> + Type<A::Database>,
{
    let mut args = A::default();
    for param in params {
        let added = match param {
            Value::Null => args.add(None::<String>),
            Value::Int(v) => args.add(*v),
            Value::Float(v) => args.add(*v),
            Value::Bool(v) => args.add(*v),
            Value::Text(v) => args.add(v.clone()),
            Value::Bytes(v) => args.add(v.clone()),
        };
        added.map_err(|e| DatabaseError::QueryFailed(format!("cannot bind parameter: {}", e)))?;
    }
    Ok(args)
}

// Begin a transaction, run one statement in the given mode and settle it.
macro_rules! run_statement {
    ($pool:expr, $args:ty, $decode:path, $sql:expr, $params:expr, $mode:expr) => {{
        let args = arguments::<$args>($params)?;
        let mut tx = $pool.begin().await.map_err(DatabaseError::connection)?;
        let result = match $mode {
            QueryMode::Fetch => sqlx::query_with($sql, args)
                .fetch_all(&mut *tx)
                .await
                .and_then(|rows| rows.iter().map($decode).collect::<std::result::Result<Vec<_>, _>>())
                .map(QueryOutcome::Rows),
            QueryMode::Write => sqlx::query_with($sql, args)
                .execute(&mut *tx)
                .await
                .map(|done| QueryOutcome::Done {
                    rows_affected: done.rows_affected(),
                }),
        };
        finish(tx, result).await
    }};
}

macro_rules! fetch_typed {
    ($pool:expr, $args:ty, $row:ty, $sql:expr, $params:expr) => {{
        let args = arguments::<$args>($params)?;
        let mut tx = $pool.begin().await.map_err(DatabaseError::connection)?;
        let result = sqlx::query_as_with::<_, $row, _>($sql, args)
            .fetch_all(&mut *tx)
            .await;
        finish(tx, result).await
    }};
}

impl Database {
    /// Run one parameterized statement on a pooled connection.
    ///
    /// The statement gets its own transaction: it commits on success and
    /// rolls back on failure. The connection returns to the pool on every
    /// path.
    pub async fn execute(&self, sql: &str, params: &[Value], mode: QueryMode) -> Result<QueryOutcome> {
        let pool = self.pool().await?;

        debug!(mode = ?mode, params = params.len(), "Executing statement");
        match pool {
            Pool::MySql(pool) => run_statement!(pool, MySqlArguments, Row::from_mysql, sql, params, mode),
            Pool::Any(pool) => run_statement!(pool, AnyArguments<'_>, Row::from_any, sql, params, mode),
        }
    }

    /// Same contract as [`Database::execute`] in fetch mode, decoding each
    /// row into `T`.
    pub async fn fetch_as<T>(&self, sql: &str, params: &[Value]) -> Result<Vec<T>>
    where
        T: for<'r> FromRow<'r, AnyRow> + for<'r> FromRow<'r, MySqlRow> + Send + Unpin,
    {
        let pool = self.pool().await?;

        debug!(params = params.len(), "Fetching typed rows");
        match pool {
            Pool::MySql(pool) => fetch_typed!(pool, MySqlArguments, T, sql, params),
            Pool::Any(pool) => fetch_typed!(pool, AnyArguments<'_>, T, sql, params),
        }
    }
}

async fn finish<DB, T>(tx: Transaction<'static, DB>, result: std::result::Result<T, sqlx::Error>) -> Result<T>
where
    DB: sqlx::Database,
{
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            warn!("Query error: {}", err);
            if let Err(rollback) = tx.rollback().await {
                warn!("Rollback failed: {}", rollback);
            }
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_lookup_is_case_sensitive() {
        let row: Row = vec![
            ("Reg_No".to_string(), Value::from("KL01AB1234")),
            ("Year".to_string(), Value::from(2020)),
        ]
        .into_iter()
        .collect();

        assert_eq!(row.get("Reg_No").and_then(Value::as_str), Some("KL01AB1234"));
        assert!(row.get("reg_no").is_none());
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["Reg_No", "Year"]);
    }

    #[test]
    fn optional_params_become_null() {
        assert_eq!(Value::from(None::<String>), Value::Null);
        assert_eq!(Value::from(Some("E001")), Value::Text("E001".into()));
    }

    #[test]
    fn outcome_counts() {
        assert_eq!(QueryOutcome::Done { rows_affected: 0 }.rows_affected(), 0);
        assert!(QueryOutcome::Done { rows_affected: 3 }.rows().is_empty());
    }

    #[test]
    fn binds_every_parameter() {
        let params = [Value::from("T010"), Value::Null, Value::from(5), Value::from(2.5)];
        assert!(arguments::<AnyArguments<'_>>(&params).is_ok());
        assert!(arguments::<MySqlArguments>(&params).is_ok());
    }

    #[test]
    fn utf8_bytes_decode_as_text() {
        assert_eq!(bytes_value(b"Oil leakage".to_vec()), Value::from("Oil leakage"));
        assert_eq!(bytes_value(vec![0xff, 0xfe]), Value::Bytes(vec![0xff, 0xfe]));
    }
}
