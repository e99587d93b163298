//! Budget report command

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use spendwatch_core::{parse_feed_csv, BudgetManager, BudgetSession, Severity};

use super::{parse_category_map, parse_range};

pub fn cmd_report(
    file: &Path,
    limits: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
    json: bool,
) -> Result<()> {
    let reader = File::open(file)
        .with_context(|| format!("cannot open feed file {}", file.display()))?;
    let summary = parse_feed_csv(reader)?;

    let limit_map = match limits {
        Some(spec) => parse_category_map(spec)?,
        None => BudgetManager::default().limits(),
    };
    let range = parse_range(from, to)?;

    let mut session = BudgetSession::new(BudgetManager::default());
    session.set_limits(&limit_map, range)?;
    session.add_transactions(summary.transactions);

    if json {
        let payload = report_payload(summary.discarded, &session);
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!();
    println!("📊 Budget Report");
    if summary.discarded > 0 {
        println!("   ({} rows discarded during import)", summary.discarded);
    }
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:<16} {:>10} {:>10} {:>8}",
        "Category", "Spent", "Limit", "Used"
    );

    for (category, budget) in session.categories() {
        let used = if budget.limit > 0.0 {
            format!("{:.0}%", budget.percentage)
        } else {
            "-".to_string()
        };
        println!(
            "   {:<16} {:>10} {:>10} {:>8}",
            category,
            format!("${:.2}", budget.spent),
            format!("${:.2}", budget.limit),
            used
        );
    }

    let status = session.status();
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:<16} {:>10} {:>10} {:>8}",
        "Total",
        format!("${:.2}", status.total_spent),
        format!("${:.2}", status.total_limit),
        format!("{:.0}%", status.percentage)
    );

    let alerts = session.alerts();
    if !alerts.is_empty() {
        println!();
        for alert in &alerts {
            let icon = match alert.severity {
                Severity::Error => "❌",
                Severity::Warning => "⚠️ ",
                Severity::Info => "ℹ️ ",
            };
            println!("   {} {}", icon, alert.message);
        }
    }
    println!();

    Ok(())
}

/// JSON payload for `--json` output.
fn report_payload(discarded: usize, session: &BudgetSession) -> serde_json::Value {
    serde_json::json!({
        "discarded": discarded,
        "categories": session.categories(),
        "status": session.status(),
        "alerts": session.alerts(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_report_payload_shape() {
        let limits: BTreeMap<String, f64> = [("grocery".to_string(), 100.0)].into();
        let mut session = BudgetSession::new(BudgetManager::with_limits(limits));
        let summary = parse_feed_csv(
            "Date,Activity Description,Category,Amount\n02/01/2025,WHOLE FOODS,Grocery,120.00\n"
                .as_bytes(),
        )
        .unwrap();
        session.add_transactions(summary.transactions);

        let payload = report_payload(summary.discarded, &session);
        assert_eq!(payload["discarded"], 0);
        assert_eq!(payload["categories"]["grocery"]["spent"], 120.0);
        assert_eq!(payload["status"]["level"], "error");
        assert_eq!(payload["alerts"][0]["type"], "error");
        assert_eq!(payload["alerts"][0]["category"], "grocery");
    }
}
