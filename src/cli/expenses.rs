// src/cli/expenses.rs — Trip-wide expense report view

use crate::ledger;
use crate::session::Session;

pub fn run_expenses(session: &Session) -> anyhow::Result<()> {
    super::print_error_banner(session);

    let Some(trip) = session.trip() else {
        anyhow::bail!("No itinerary available.");
    };

    let report = ledger::aggregate(trip);

    println!();
    println!("  Total Expenses   ¥{}", report.grand_total);
    println!("  包含 {} 人份預算", trip.participants);
    println!();
    println!("  現金   ¥{}", report.cash_total);
    println!("  信用卡 ¥{}", report.card_total);
    println!();

    if report.line_items.is_empty() {
        println!("  尚無記帳資料");
        return Ok(());
    }

    for item in &report.line_items {
        println!(
            "  {:<24} {:<12} {} · {} 人   ¥{}",
            item.activity, item.day_title, item.method, item.people_count, item.total
        );
    }

    Ok(())
}
