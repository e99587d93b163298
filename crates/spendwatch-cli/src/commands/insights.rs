//! Insight generation command

use std::fs::File;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use spendwatch_core::{
    parse_feed_csv, BudgetManager, BudgetSession, InsightEngine, Severity,
};

use super::parse_category_map;

pub async fn cmd_insights(
    file: &Path,
    limits: Option<&str>,
    timeout: u64,
    json: bool,
) -> Result<()> {
    let reader = File::open(file)
        .with_context(|| format!("cannot open feed file {}", file.display()))?;
    let summary = parse_feed_csv(reader)?;

    let manager = match limits {
        Some(spec) => BudgetManager::with_limits(parse_category_map(spec)?),
        None => BudgetManager::default(),
    };
    let mut session = BudgetSession::new(manager);
    session.add_transactions(summary.transactions);

    let engine = InsightEngine::from_env().with_timeout(Duration::from_secs(timeout));
    let bundle = engine
        .generate_insights(session.transactions(), session.categories())
        .await;

    if json {
        println!("{}", serde_json::to_string_pretty(&bundle)?);
        return Ok(());
    }

    println!();
    println!("💡 Spending Insights");
    println!("   ─────────────────────────────────────────────────────────────");

    if !bundle.alerts.is_empty() {
        for alert in &bundle.alerts {
            let icon = match alert.severity {
                Severity::Error => "❌",
                Severity::Warning => "⚠️ ",
                Severity::Info => "ℹ️ ",
            };
            println!("   {} {}", icon, alert.message);
        }
        println!();
    }

    for rec in &bundle.recommendations {
        println!("   📌 [{}] {}", rec.category, rec.message);
        for step in &rec.action_steps {
            println!("      - {}", step);
        }
        if let Some(savings) = rec.potential_savings {
            println!("      Potential savings: ${:.2}", savings);
        }
    }
    if !bundle.recommendations.is_empty() {
        println!();
    }

    for insight in &bundle.insights {
        println!("   💭 {}", insight.message);
    }
    println!();

    Ok(())
}
