// src/ledger/mod.rs — Per-event expense ledger
//
// Pure functions over the itinerary graph. Every write recomputes the
// derived total; aggregation never trusts stored totals.

use crate::itinerary::{Expense, PaymentMethod, Trip};

/// Outcome of `update_expense`. The unknown-id case is a no-op by design,
/// but an observable one: callers can log or surface it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    Applied,
    NoSuchEvent,
}

/// Replace the expense of the event with `event_id`, recomputing the total.
///
/// Scans days in order and stops at the first match (ids are unique within
/// a trip). Currency and the is-estimate flag are preserved. Returns a new
/// `Trip`; untouched days and events are cloned as-is, so every other event
/// is structurally identical to the input.
pub fn update_expense(
    trip: &Trip,
    event_id: &str,
    amount_per_person: f64,
    method: PaymentMethod,
    people_count: u32,
) -> (Trip, UpdateStatus) {
    let mut updated = trip.clone();

    for day in &mut updated.days {
        if let Some(event) = day.events.iter_mut().find(|e| e.id == event_id) {
            event.expense = Expense {
                amount_per_person,
                method,
                people_count,
                total: amount_per_person * people_count as f64,
                currency: event.expense.currency.clone(),
                is_estimate: event.expense.is_estimate,
            };
            return (updated, UpdateStatus::Applied);
        }
    }

    (updated, UpdateStatus::NoSuchEvent)
}

/// One row of the aggregate report, in day/event iteration order.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub event_id: String,
    pub activity: String,
    pub day_title: String,
    pub method: PaymentMethod,
    /// Effective headcount used for the total.
    pub people_count: u32,
    pub total: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseReport {
    pub cash_total: f64,
    pub card_total: f64,
    pub grand_total: f64,
    pub line_items: Vec<LineItem>,
}

/// Aggregate every priced event across the trip, bucketed by settlement
/// method. Totals are recomputed from amount × headcount here — the stored
/// `total` fields are display-only and never trusted.
pub fn aggregate(trip: &Trip) -> ExpenseReport {
    let mut report = ExpenseReport::default();

    for day in &trip.days {
        for event in &day.events {
            let expense = &event.expense;
            if !(expense.amount_per_person > 0.0) {
                continue;
            }

            let people = expense.effective_people(trip.participants);
            let total = expense.amount_per_person * people as f64;

            match expense.method {
                PaymentMethod::Cash => report.cash_total += total,
                PaymentMethod::Card => report.card_total += total,
            }

            report.line_items.push(LineItem {
                event_id: event.id.clone(),
                activity: event.activity.clone(),
                day_title: day.day_title.clone(),
                method: expense.method,
                people_count: people,
                total,
            });
        }
    }

    report.grand_total = report.cash_total + report.card_total;
    report
}

/// Rewrite every stored total from the invariant. Applied once after
/// extraction, since the backend's arithmetic is never trusted.
pub fn normalize_totals(mut trip: Trip) -> Trip {
    let participants = trip.participants;
    for day in &mut trip.days {
        for event in &mut day.events {
            let expense = &mut event.expense;
            let people = expense.effective_people(participants);
            expense.total = expense.amount_per_person * people as f64;
        }
    }
    trip
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itinerary::{Day, Event, EventCategory};
    use pretty_assertions::assert_eq;

    fn event(id: &str, amount: f64, method: PaymentMethod, people: u32) -> Event {
        Event {
            id: id.into(),
            time: "09:00".into(),
            end_time: None,
            activity: format!("activity-{}", id),
            location: String::new(),
            notes: String::new(),
            category: EventCategory::Food,
            emoji: None,
            details: Default::default(),
            expense: Expense {
                amount_per_person: amount,
                method,
                people_count: people,
                total: amount * people as f64,
                ..Default::default()
            },
            estimated_travel_time: None,
            estimated_arrival_time: None,
            distance: None,
            traffic_status: None,
        }
    }

    fn day(title: &str, events: Vec<Event>) -> Day {
        Day {
            date: "2025-10-28".into(),
            day_of_week: "TUE".into(),
            day_number: "28".into(),
            day_title: title.into(),
            summary: String::new(),
            location: String::new(),
            image_keyword: None,
            coordinates: None,
            events,
        }
    }

    fn trip(days: Vec<Day>) -> Trip {
        Trip {
            trip_title: "test".into(),
            year: "2025".into(),
            month: "10月".into(),
            participants: 6,
            days,
        }
    }

    // ─── update_expense ─────────────────────────────────────────

    #[test]
    fn test_update_recomputes_total() {
        let t = trip(vec![day("d1", vec![event("e1", 0.0, PaymentMethod::Cash, 0)])]);

        let (t2, status) = update_expense(&t, "e1", 2500.0, PaymentMethod::Card, 4);
        assert_eq!(status, UpdateStatus::Applied);

        let e = t2.find_event("e1").unwrap();
        assert_eq!(e.expense.amount_per_person, 2500.0);
        assert_eq!(e.expense.method, PaymentMethod::Card);
        assert_eq!(e.expense.people_count, 4);
        assert_eq!(e.expense.total, 10000.0);
    }

    #[test]
    fn test_update_preserves_currency_and_estimate_flag() {
        let mut t = trip(vec![day("d1", vec![event("e1", 100.0, PaymentMethod::Cash, 2)])]);
        t.days[0].events[0].expense.currency = "USD".into();
        t.days[0].events[0].expense.is_estimate = true;

        let (t2, _) = update_expense(&t, "e1", 200.0, PaymentMethod::Cash, 2);
        let e = t2.find_event("e1").unwrap();
        assert_eq!(e.expense.currency, "USD");
        assert!(e.expense.is_estimate);
    }

    #[test]
    fn test_update_unknown_id_is_observable_noop() {
        let t = trip(vec![day("d1", vec![event("e1", 100.0, PaymentMethod::Cash, 2)])]);

        let (t2, status) = update_expense(&t, "nonexistent-id", 100.0, PaymentMethod::Cash, 1);
        assert_eq!(status, UpdateStatus::NoSuchEvent);
        assert_eq!(t2, t);
    }

    #[test]
    fn test_update_does_not_touch_other_events() {
        let t = trip(vec![
            day(
                "d1",
                vec![
                    event("e1", 100.0, PaymentMethod::Cash, 2),
                    event("e2", 300.0, PaymentMethod::Card, 3),
                ],
            ),
            day("d2", vec![event("e3", 500.0, PaymentMethod::Cash, 1)]),
        ]);

        let (t2, _) = update_expense(&t, "e2", 999.0, PaymentMethod::Cash, 1);

        assert_eq!(t2.find_event("e1").unwrap(), t.find_event("e1").unwrap());
        assert_eq!(t2.find_event("e3").unwrap(), t.find_event("e3").unwrap());
        assert_eq!(t2.find_event("e2").unwrap().expense.total, 999.0);
    }

    #[test]
    fn test_update_stops_at_first_match() {
        // Duplicate ids should not happen post-extraction, but if they do,
        // only the first match is written.
        let t = trip(vec![day(
            "d1",
            vec![
                event("dup", 100.0, PaymentMethod::Cash, 1),
                event("dup", 200.0, PaymentMethod::Cash, 1),
            ],
        )]);

        let (t2, _) = update_expense(&t, "dup", 50.0, PaymentMethod::Cash, 1);
        assert_eq!(t2.days[0].events[0].expense.amount_per_person, 50.0);
        assert_eq!(t2.days[0].events[1].expense.amount_per_person, 200.0);
    }

    #[test]
    fn test_update_is_idempotent() {
        let t = trip(vec![day("d1", vec![event("e1", 0.0, PaymentMethod::Cash, 0)])]);

        let (t2, _) = update_expense(&t, "e1", 3000.0, PaymentMethod::Cash, 6);
        let (t3, _) = update_expense(&t2, "e1", 3000.0, PaymentMethod::Cash, 6);
        assert_eq!(t2, t3);

        let report = aggregate(&t3);
        assert_eq!(report.line_items.len(), 1);
        assert_eq!(report.line_items[0].total, 18000.0);
    }

    // ─── aggregate ──────────────────────────────────────────────

    #[test]
    fn test_aggregate_scenario_from_headcount_fallback() {
        // Headcount 6, one Food event at 3000/person, cash, people unset.
        let t = trip(vec![day(
            "d1",
            vec![event("e1", 3000.0, PaymentMethod::Cash, 0)],
        )]);

        let report = aggregate(&t);
        assert_eq!(report.cash_total, 18000.0);
        assert_eq!(report.card_total, 0.0);
        assert_eq!(report.grand_total, 18000.0);
        assert_eq!(report.line_items.len(), 1);
        assert_eq!(report.line_items[0].people_count, 6);
    }

    #[test]
    fn test_aggregate_buckets_by_method() {
        let t = trip(vec![day(
            "d1",
            vec![
                event("e1", 1000.0, PaymentMethod::Cash, 2),
                event("e2", 500.0, PaymentMethod::Card, 4),
                event("e3", 250.0, PaymentMethod::Cash, 4),
            ],
        )]);

        let report = aggregate(&t);
        assert_eq!(report.cash_total, 3000.0);
        assert_eq!(report.card_total, 2000.0);
        assert_eq!(report.grand_total, report.cash_total + report.card_total);
    }

    #[test]
    fn test_aggregate_skips_unpriced_events() {
        let t = trip(vec![day(
            "d1",
            vec![
                event("free", 0.0, PaymentMethod::Cash, 6),
                event("paid", 100.0, PaymentMethod::Cash, 1),
            ],
        )]);

        let report = aggregate(&t);
        assert_eq!(report.line_items.len(), 1);
        assert_eq!(report.line_items[0].event_id, "paid");
    }

    #[test]
    fn test_aggregate_ignores_stored_totals() {
        let mut t = trip(vec![day(
            "d1",
            vec![event("e1", 1000.0, PaymentMethod::Cash, 2)],
        )]);
        // Corrupt the stored total; the aggregate must not echo it.
        t.days[0].events[0].expense.total = 999999.0;

        let report = aggregate(&t);
        assert_eq!(report.line_items[0].total, 2000.0);
        assert_eq!(report.cash_total, 2000.0);
    }

    #[test]
    fn test_aggregate_preserves_iteration_order() {
        let t = trip(vec![
            day("day one", vec![event("a", 1.0, PaymentMethod::Cash, 1)]),
            day(
                "day two",
                vec![
                    event("b", 1.0, PaymentMethod::Cash, 1),
                    event("c", 1.0, PaymentMethod::Cash, 1),
                ],
            ),
        ]);

        let report = aggregate(&t);
        let ids: Vec<&str> = report.line_items.iter().map(|i| i.event_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(report.line_items[1].day_title, "day two");
    }

    #[test]
    fn test_aggregate_negative_amount_excluded() {
        let t = trip(vec![day(
            "d1",
            vec![event("e1", -500.0, PaymentMethod::Cash, 2)],
        )]);
        let report = aggregate(&t);
        assert!(report.line_items.is_empty());
        assert_eq!(report.grand_total, 0.0);
    }

    // ─── normalize_totals ───────────────────────────────────────

    #[test]
    fn test_normalize_rewrites_backend_totals() {
        let mut t = trip(vec![day(
            "d1",
            vec![event("e1", 3000.0, PaymentMethod::Cash, 0)],
        )]);
        // Backend claimed a bogus total
        t.days[0].events[0].expense.total = 1.0;

        let t = normalize_totals(t);
        // people_count 0 falls back to 6 participants for the product,
        // but the stored count stays 0.
        assert_eq!(t.days[0].events[0].expense.total, 18000.0);
        assert_eq!(t.days[0].events[0].expense.people_count, 0);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let t = trip(vec![day(
            "d1",
            vec![event("e1", 1200.0, PaymentMethod::Card, 3)],
        )]);
        let once = normalize_totals(t.clone());
        let twice = normalize_totals(once.clone());
        assert_eq!(once, twice);
    }
}
