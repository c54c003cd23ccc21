use anyhow::{Context, Result};

use crate::db::Database;
use crate::models::Subscription;
use crate::ui::util::{format_amount, parse_amount, truncate};

pub(crate) fn as_cli(args: &[String], db: &Database) -> Result<()> {
    match args[0].as_str() {
        "summary" | "s" => cli_summary(&args[1..], db),
        "export" => cli_export(&args[1..], db),
        "subscriptions" | "subs" => cli_subscriptions(db),
        "subscribe" => cli_subscribe(&args[1..], db),
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

pub(crate) fn print_usage() {
    println!("FinTrack — local-only expense tracker");
    println!();
    println!("Usage: fintrack [--db <path>] [command]");
    println!();
    println!("Commands:");
    println!("  (none)                             Launch the interactive menu");
    println!("  summary [YYYY-MM]                  Category totals and budget status");
    println!("  export [path]                      Export expenses to CSV");
    println!("    --month <YYYY-MM>                Only expenses from this month");
    println!("  subscriptions                      List subscriptions");
    println!("  subscribe <name> <amount> <date>   Add a subscription");
    println!("  --help, -h                         Show this help");
    println!("  --version, -V                      Show version");
}

fn current_month() -> String {
    chrono::Local::now().format("%Y-%m").to_string()
}

fn cli_summary(args: &[String], db: &Database) -> Result<()> {
    let month = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .cloned()
        .unwrap_or_else(current_month);

    let status = db.get_budget_status(&month)?;
    let totals = db.get_category_totals()?;

    println!("FinTrack — {month}");
    println!("{}", "─".repeat(40));
    println!("  Spent:      {}", format_amount(status.spent));
    match (status.limit, status.remaining()) {
        (Some(limit), Some(remaining)) => {
            println!("  Budget:     {}", format_amount(limit));
            println!("  Remaining:  {}", format_amount(remaining));
        }
        _ => println!("  Budget:     (none)"),
    }
    if status.is_exceeded() {
        println!("  ⚠ Budget exceeded");
    }

    if !totals.is_empty() {
        println!();
        println!("Spending by Category (all time):");
        for row in &totals {
            println!("  {:<24} {}", truncate(&row.name, 24), format_amount(row.total));
        }
    }

    Ok(())
}

fn cli_export(args: &[String], db: &Database) -> Result<()> {
    let month = args
        .windows(2)
        .find(|w| w[0] == "--month")
        .map(|w| w[1].clone());

    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .cloned()
        .unwrap_or_else(|| match &month {
            Some(m) => format!("fintrack-export-{m}.csv"),
            None => "fintrack-export.csv".to_string(),
        });

    let expenses = db.get_expenses(month.as_deref())?;
    if expenses.is_empty() {
        println!("No expenses to export");
        return Ok(());
    }

    let mut wtr = csv::Writer::from_path(&output_path)
        .with_context(|| format!("Failed to create {output_path}"))?;
    wtr.write_record(["id", "date", "title", "amount", "category_id"])?;
    for e in &expenses {
        wtr.write_record([
            e.id.unwrap_or(0).to_string(),
            e.date.clone(),
            e.title.clone(),
            e.amount.to_string(),
            e.category_id.to_string(),
        ])?;
    }
    wtr.flush()
        .with_context(|| format!("Failed to write {output_path}"))?;

    log::info!("exported {} expenses to {output_path}", expenses.len());
    println!("Exported {} expenses to {output_path}", expenses.len());
    Ok(())
}

fn cli_subscriptions(db: &Database) -> Result<()> {
    let subs = db.get_subscriptions()?;
    if subs.is_empty() {
        println!("No subscriptions");
        return Ok(());
    }

    println!("{:<4} {:<24} {:>12}  Next", "ID", "Name", "Amount");
    println!("{}", "─".repeat(55));
    for sub in &subs {
        println!(
            "{:<4} {:<24} {:>12}  {}",
            sub.id.unwrap_or(0),
            truncate(&sub.name, 24),
            format_amount(sub.amount),
            sub.next_date,
        );
    }
    Ok(())
}

fn cli_subscribe(args: &[String], db: &Database) -> Result<()> {
    let [name, amount, next_date] = args else {
        anyhow::bail!("Usage: fintrack subscribe <name> <amount> <next-date>");
    };
    let amount = parse_amount("amount", amount)?;
    let id = db.insert_subscription(&Subscription::new(
        name.clone(),
        amount,
        next_date.clone(),
    ))?;
    println!("Subscription {id} added");
    Ok(())
}
