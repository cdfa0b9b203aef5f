use anyhow::{Context, Result};
use clap::Parser;
use foodshare::Db;
use foodshare_cli::{Cli, FoodshareCli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    let config = cli.load_config()?;
    let url = config.database_url();
    log::debug!("opening database; url={url}");

    let db = Db::builder()
        .max_idle_connections(config.max_idle_connections)
        .connect(&url)
        .with_context(|| format!("failed to open {}", config.database))?;
    db.push_schema()?;

    FoodshareCli::with_config(db, config).run(cli)
}
