use clap::{Parser, ValueEnum};
use cookbook::config::db::{DbKind, RuntimeEnv};
use cookbook::infra::db::connect;
use migration::{migrate, MigrationCommand};

#[derive(Clone, Copy, ValueEnum)]
enum Env {
    Prod,
    Test,
}

impl From<Env> for RuntimeEnv {
    fn from(env: Env) -> Self {
        match env {
            Env::Prod => RuntimeEnv::Prod,
            Env::Test => RuntimeEnv::Test,
        }
    }
}

/// In-memory SQLite is omitted: the database would vanish when the command exits.
#[derive(Clone, Copy, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

impl From<Db> for DbKind {
    fn from(db: Db) -> Self {
        match db {
            Db::Postgres => DbKind::Postgres,
            Db::SqliteFile => DbKind::SqliteFile,
        }
    }
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Cookbook database migration tool")]
struct Args {
    /// up | down | fresh | reset | refresh | status
    #[arg(value_parser = parse_command)]
    command: MigrationCommand,

    #[arg(short, long, value_enum, default_value = "test")]
    env: Env,

    #[arg(short, long, value_enum, default_value = "postgres")]
    db: Db,
}

fn parse_command(raw: &str) -> Result<MigrationCommand, String> {
    raw.parse()
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,cookbook=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let conn = match connect(args.env.into(), args.db.into()).await {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("Could not connect: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migrate(&conn, args.command).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
