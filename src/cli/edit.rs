// src/cli/edit.rs — Interactive expense editing

use crate::itinerary::PaymentMethod;
use crate::ledger::UpdateStatus;
use crate::session::Session;

/// Pick a day and event, take the new expense values, route them through
/// the session, and print the refreshed totals.
pub fn run_edit(session: &mut Session) -> anyhow::Result<()> {
    super::print_error_banner(session);

    let Some(trip) = session.trip() else {
        anyhow::bail!("No itinerary available.");
    };

    let day_labels: Vec<String> = trip
        .days
        .iter()
        .map(|d| format!("{} ({}) {}", d.date, d.day_of_week, d.day_title))
        .collect();
    if day_labels.is_empty() {
        anyhow::bail!("The itinerary has no days.");
    }

    let day_choice = inquire::Select::new("Day:", day_labels.clone())
        .prompt()
        .map_err(|_| anyhow::anyhow!("Selection cancelled"))?;
    let day_index = day_labels.iter().position(|l| l == &day_choice).unwrap_or(0);

    let day = &trip.days[day_index];
    if day.events.is_empty() {
        anyhow::bail!("No events on that day.");
    }

    let event_labels: Vec<String> = day
        .events
        .iter()
        .map(|e| format!("{} {}", e.time, e.activity))
        .collect();
    let event_choice = inquire::Select::new("Event:", event_labels.clone())
        .prompt()
        .map_err(|_| anyhow::anyhow!("Selection cancelled"))?;
    let event_index = event_labels
        .iter()
        .position(|l| l == &event_choice)
        .unwrap_or(0);

    let event = &day.events[event_index];
    let event_id = event.id.clone();

    let amount_input = inquire::Text::new("Amount per person:")
        .with_default(&event.expense.amount_per_person.to_string())
        .prompt()
        .map_err(|_| anyhow::anyhow!("Input cancelled"))?;
    // Unparseable input is treated as 0, like an emptied form field.
    let amount: f64 = amount_input.trim().parse().unwrap_or(0.0);

    let method_choice = inquire::Select::new("Method:", vec!["CASH", "CARD"])
        .prompt()
        .map_err(|_| anyhow::anyhow!("Selection cancelled"))?;
    let method = if method_choice == "CARD" {
        PaymentMethod::Card
    } else {
        PaymentMethod::Cash
    };

    let participants = trip.participants;
    let default_people = event.expense.effective_people(participants);
    let people_input = inquire::Text::new("People count:")
        .with_default(&default_people.to_string())
        .prompt()
        .map_err(|_| anyhow::anyhow!("Input cancelled"))?;
    let people: u32 = people_input.trim().parse().unwrap_or(participants);

    match session.update_expense(&event_id, amount, method, people) {
        UpdateStatus::Applied => {
            if let Some(updated) = session.trip().and_then(|t| t.find_event(&event_id)) {
                println!();
                println!(
                    "  {}  ¥{} × {} = ¥{}",
                    updated.activity,
                    updated.expense.amount_per_person,
                    updated.expense.effective_people(participants),
                    updated.expense.total,
                );
            }
            super::expenses::run_expenses(session)?;
        }
        UpdateStatus::NoSuchEvent => {
            anyhow::bail!("Event disappeared mid-edit.");
        }
    }

    Ok(())
}
