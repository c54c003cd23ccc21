use anyhow::{Context, Result};
use std::path::PathBuf;

const DB_FILE: &str = "fintrack.db";

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) db_path: PathBuf,
}

impl Config {
    /// Use the `--db` path when given, otherwise the platform data directory.
    pub(crate) fn resolve(db_flag: Option<PathBuf>) -> Result<Self> {
        let db_path = match db_flag {
            Some(path) => path,
            None => default_db_path()?,
        };
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory: {}", parent.display()))?;
        }
        Ok(Self { db_path })
    }
}

/// Pull `--db <path>` (or `--db=<path>`) out of the arguments and return it
/// together with everything else in order.
pub(crate) fn split_db_flag(args: &[String]) -> Result<(Option<PathBuf>, Vec<String>)> {
    let mut db = None;
    let mut rest = Vec::with_capacity(args.len());
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--db" {
            let value = iter
                .next()
                .ok_or_else(|| anyhow::anyhow!("--db requires a path"))?;
            db = Some(PathBuf::from(value));
        } else if let Some(value) = arg.strip_prefix("--db=") {
            db = Some(PathBuf::from(value));
        } else {
            rest.push(arg.clone());
        }
    }
    Ok((db, rest))
}

fn default_db_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "fintrack", "FinTrack")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().join(DB_FILE))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
