//! Vehicle Workshop CLI
//!
//! Service desk and workshop floor tool over the workshop database.

mod commands;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use commands::{customer, manager, rep, tech, Output};
use inquire::{Password, PasswordDisplayMode};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;
use workshop_database::{Credentials, Database, DatabaseConfig, QueryMode, Value, DEFAULT_POOL_SIZE};

#[derive(Parser)]
#[command(name = "workshop")]
#[command(about = "Vehicle Workshop - customers, service jobs and technicians")]
#[command(version)]
struct Cli {
    /// MySQL server host
    #[arg(long, env = "WORKSHOP_DB_HOST", default_value = "localhost", global = true)]
    host: String,

    /// MySQL server port
    #[arg(long, env = "WORKSHOP_DB_PORT", default_value_t = 3306, global = true)]
    port: u16,

    /// MySQL user
    #[arg(short, long, env = "WORKSHOP_DB_USER", default_value = "root", global = true)]
    user: String,

    /// Database name
    #[arg(
        short,
        long,
        env = "WORKSHOP_DB_NAME",
        default_value = "vehicle_workshop_management",
        global = true
    )]
    database: String,

    /// MySQL password (prompted for when not set)
    #[arg(long, env = "WORKSHOP_DB_PASSWORD", hide_env_values = true, global = true)]
    password: Option<String>,

    /// Connection URL, overrides the MySQL settings (e.g. sqlite://workshop.db?mode=rwc)
    #[arg(long, env = "WORKSHOP_DATABASE_URL", global = true)]
    url: Option<String>,

    /// Maximum pooled connections
    #[arg(long, env = "WORKSHOP_DB_POOL_SIZE", default_value_t = DEFAULT_POOL_SIZE, global = true)]
    pool_size: u32,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the database is reachable
    Ping,

    /// Create any missing workshop tables
    InitSchema,

    /// Run a single parameterized statement
    Query {
        /// SQL with `?` placeholders
        sql: String,

        /// Positional parameter; integers bind as numbers, `NULL` as null
        #[arg(short, long = "param")]
        params: Vec<String>,

        /// Return rows instead of an affected-row count
        #[arg(short, long)]
        fetch: bool,
    },

    /// Staff administration
    Manager(manager::ManagerArgs),

    /// Customer representative desk
    Rep(rep::RepArgs),

    /// Technician workshop floor
    Tech(tech::TechArgs),

    /// Customer self-service
    Customer(customer::CustomerArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for results
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = database_config(&cli)?;
    debug!("Using database {}", config.describe());

    let mut db = Database::new(config);
    let out = Output::new(cli.json);

    let result = run(&db, cli.command, &out).await;
    db.shutdown();
    result
}

async fn run(db: &Database, command: Commands, out: &Output) -> Result<()> {
    match command {
        Commands::Ping => ping(db, out).await,
        Commands::InitSchema => {
            db.apply_schema().await?;
            out.done("Schema is up to date")
        }
        Commands::Query { sql, params, fetch } => query(db, &sql, &params, fetch, out).await,
        Commands::Manager(args) => manager::run(db, args, out).await,
        Commands::Rep(args) => rep::run(db, args, out).await,
        Commands::Tech(args) => tech::run(db, args, out).await,
        Commands::Customer(args) => customer::run(db, args, out).await,
    }
}

fn database_config(cli: &Cli) -> Result<DatabaseConfig> {
    let config = match &cli.url {
        Some(url) => DatabaseConfig::url(url.clone()),
        None => {
            let password = match &cli.password {
                Some(password) => password.clone(),
                None => prompt_password(&cli.user, &cli.host)?,
            };
            let credentials =
                Credentials::new(&cli.host, &cli.user, password, &cli.database).with_port(cli.port);
            DatabaseConfig::mysql(credentials)
        }
    };

    Ok(config.pool_size(cli.pool_size))
}

fn prompt_password(user: &str, host: &str) -> Result<String> {
    Password::new(&format!("MySQL password for {}@{}:", user, host))
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read database password")
}

async fn ping(db: &Database, out: &Output) -> Result<()> {
    let status = db.test_connection().await;

    if out.json {
        out.print_json(&serde_json::json!({
            "connected": status.connected,
            "message": status.message,
        }))?;
    } else if status.connected {
        println!("Connected to {}", db.config().describe());
    }

    if !status.connected {
        bail!("{}", status.message);
    }
    Ok(())
}

async fn query(db: &Database, sql: &str, params: &[String], fetch: bool, out: &Output) -> Result<()> {
    let params: Vec<Value> = params.iter().map(|p| parse_param(p)).collect();
    let mode = if fetch { QueryMode::Fetch } else { QueryMode::Write };

    let outcome = db.execute(sql, &params, mode).await?;
    match mode {
        QueryMode::Fetch => {
            let rows = outcome.rows();
            if out.json {
                return out.print_json(&rows);
            }
            commands::print_rows(&rows);
            Ok(())
        }
        QueryMode::Write => out.done(&format!("{} row(s) affected", outcome.rows_affected())),
    }
}

fn parse_param(raw: &str) -> Value {
    if raw.eq_ignore_ascii_case("null") {
        return Value::Null;
    }
    match raw.parse::<i64>() {
        Ok(n) => Value::Int(n),
        Err(_) => Value::from(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_keep_their_shape() {
        assert_eq!(parse_param("42"), Value::Int(42));
        assert_eq!(parse_param("NULL"), Value::Null);
        assert_eq!(parse_param("KL01AB1234"), Value::from("KL01AB1234"));
    }

    #[test]
    fn url_skips_the_password_prompt() {
        let cli = Cli::parse_from(["workshop", "--url", "sqlite::memory:", "--pool-size", "2", "ping"]);
        let config = database_config(&cli).unwrap();
        assert_eq!(config.pool_size, 2);
        assert_eq!(config.describe(), "sqlite::memory:");
    }

    #[test]
    fn nested_role_commands_parse() {
        let cli = Cli::parse_from([
            "workshop", "--json", "tech", "add-parts", "1", "OIL5W30:4:450", "FLT100:1:299",
        ]);
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Tech(_)));
    }

    #[test]
    fn rep_listings_parse_without_an_employee() {
        for listing in ["customers", "technicians"] {
            let cli = Cli::try_parse_from(["workshop", "rep", listing]).unwrap();
            let Commands::Rep(args) = cli.command else {
                panic!("expected a rep command");
            };
            assert!(args.employee.is_none() || std::env::var("WORKSHOP_EMPLOYEE_ID").is_ok());
        }
    }
}
