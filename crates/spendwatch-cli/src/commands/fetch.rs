//! Sandbox feed fetch command

use anyhow::{bail, Result};
use spendwatch_core::{BudgetManager, BudgetSession, SandboxFeed};

use super::{parse_category_map, truncate};

pub async fn cmd_fetch(limits: Option<&str>) -> Result<()> {
    let Some(feed) = SandboxFeed::from_env() else {
        bail!("sandbox feed not configured (set SANDBOX_API_KEY and SANDBOX_CUSTOMER_ID)");
    };

    let transactions = feed.fetch_transactions().await?;

    let manager = match limits {
        Some(spec) => BudgetManager::with_limits(parse_category_map(spec)?),
        None => BudgetManager::default(),
    };
    let mut session = BudgetSession::new(manager);
    let added = session.add_transactions(transactions);

    println!();
    println!("🏦 Sandbox Feed ({} transactions)", added);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:<12} {:<30} {:<14} {:>10}",
        "Date", "Description", "Category", "Amount"
    );

    for txn in session.transactions() {
        println!(
            "   {:<12} {:<30} {:<14} {:>10}",
            txn.date,
            truncate(&txn.description, 30),
            txn.category,
            format!("${:.2}", txn.amount)
        );
    }

    println!("   ─────────────────────────────────────────────────────────────");
    let status = session.status();
    println!("   Total spent: ${:.2}", status.total_spent);
    println!();

    Ok(())
}
