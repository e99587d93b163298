//! Budget plan command

use anyhow::Result;
use spendwatch_core::BudgetManager;

use super::parse_category_map;

pub fn cmd_plan(total: f64, allocate: &str) -> Result<()> {
    let percentages = parse_category_map(allocate)?;

    let mut manager = BudgetManager::default();
    manager.reallocate(total, &percentages)?;

    println!();
    println!("📋 Budget Plan (${:.2} total)", total);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   {:<16} {:>8} {:>12}", "Category", "Share", "Limit");

    let mut allocated = 0.0;
    for (category, budget) in manager.categories() {
        if budget.limit <= 0.0 {
            continue;
        }
        let pct = percentages.get(category).copied().unwrap_or(0.0);
        allocated += budget.limit;
        println!(
            "   {:<16} {:>8} {:>12}",
            category,
            format!("{:.1}%", pct),
            format!("${:.2}", budget.limit)
        );
    }

    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:<16} {:>8} {:>12}",
        "Allocated",
        "",
        format!("${:.2}", allocated)
    );
    println!(
        "   {:<16} {:>8} {:>12}",
        "Unallocated",
        "",
        format!("${:.2}", total - allocated)
    );
    println!();

    Ok(())
}
