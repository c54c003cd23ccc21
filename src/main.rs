mod config;
mod db;
mod error;
mod models;
mod run;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (db_flag, args) = config::split_db_flag(&args)?;

    match args.first().map(String::as_str) {
        Some("--help" | "-h" | "help") => {
            run::print_usage();
            return Ok(());
        }
        Some("--version" | "-V" | "version") => {
            println!("fintrack {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    let cfg = config::Config::resolve(db_flag)?;
    let db = db::Database::open(&cfg.db_path)?;

    if args.is_empty() {
        run::as_menu(&db)
    } else {
        run::as_cli(&args, &db)
    }
}
