// src/session/mod.rs — Process-scoped session state
//
// Single owner of the canonical Trip value. All mutation goes through the
// ledger's pure functions; views read the held instance and re-render when
// the version channel ticks. No view ever mutates the trip directly.

pub mod debounce;

use tokio::sync::watch;

use crate::infra::errors::TabijiError;
use crate::itinerary::{Coordinates, Day, Event, EventCategory, PaymentMethod, TrafficStatus, Trip};
use crate::ledger::{self, UpdateStatus};

/// Load lifecycle. A failure retains the previously successful trip so
/// views can show stale-but-valid data next to the error banner.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Opaque generation token handed out by `begin_load`. A completion that
/// presents an old token is discarded — a stale response must never
/// overwrite state written by a newer request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken(u64);

pub struct Session {
    trip: Option<Trip>,
    phase: LoadPhase,
    selected_day: usize,
    /// Detail-view copy of the currently open event. Refreshed in the same
    /// transition as any expense edit so the two views never diverge.
    open_event: Option<Event>,
    generation: u64,
    version_tx: watch::Sender<u64>,
}

impl Session {
    pub fn new() -> Self {
        let (version_tx, _) = watch::channel(0);
        Self {
            trip: None,
            phase: LoadPhase::Idle,
            selected_day: 0,
            open_event: None,
            generation: 0,
            version_tx,
        }
    }

    /// Views subscribe here and re-render on every version tick.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version_tx.subscribe()
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn trip(&self) -> Option<&Trip> {
        self.trip.as_ref()
    }

    pub fn selected_day(&self) -> usize {
        self.selected_day
    }

    pub fn select_day(&mut self, index: usize) {
        let len = self.trip.as_ref().map(|t| t.days.len()).unwrap_or(0);
        if len == 0 {
            self.selected_day = 0;
        } else {
            self.selected_day = index.min(len - 1);
        }
        self.notify();
    }

    pub fn open_event(&self) -> Option<&Event> {
        self.open_event.as_ref()
    }

    /// Open the detail view for an event, cloning its current state.
    pub fn open_detail(&mut self, event_id: &str) -> bool {
        let found = self
            .trip
            .as_ref()
            .and_then(|t| t.find_event(event_id))
            .cloned();
        let opened = found.is_some();
        if opened {
            self.open_event = found;
            self.notify();
        }
        opened
    }

    pub fn close_detail(&mut self) {
        if self.open_event.take().is_some() {
            self.notify();
        }
    }

    /// Start a load/reload. Returns the token the eventual completion must
    /// present.
    pub fn begin_load(&mut self) -> LoadToken {
        self.generation += 1;
        self.phase = LoadPhase::Loading;
        self.notify();
        LoadToken(self.generation)
    }

    /// Apply a load result. Returns false when the result was stale (an
    /// out-of-order completion for a superseded request) and was discarded.
    pub fn complete_load(
        &mut self,
        token: LoadToken,
        result: Result<Trip, TabijiError>,
    ) -> bool {
        if token.0 != self.generation {
            tracing::debug!(
                token = token.0,
                current = self.generation,
                "discarding stale load completion"
            );
            return false;
        }

        match result {
            Ok(trip) => {
                // Extraction output is never trusted on totals.
                self.trip = Some(ledger::normalize_totals(trip));
                self.selected_day = 0;
                self.open_event = None;
                self.phase = LoadPhase::Ready;
            }
            Err(e) => {
                // Prior trip (if any) is retained on purpose.
                self.phase = LoadPhase::Failed(e.to_string());
            }
        }
        self.notify();
        true
    }

    /// Route an expense edit through the ledger. On success the held trip
    /// is replaced and, when the edited event is open in the detail view,
    /// that copy is refreshed in the same transition.
    pub fn update_expense(
        &mut self,
        event_id: &str,
        amount_per_person: f64,
        method: PaymentMethod,
        people_count: u32,
    ) -> UpdateStatus {
        let Some(trip) = self.trip.as_ref() else {
            return UpdateStatus::NoSuchEvent;
        };

        let (updated, status) =
            ledger::update_expense(trip, event_id, amount_per_person, method, people_count);

        match status {
            UpdateStatus::Applied => {
                let detail_is_open = self
                    .open_event
                    .as_ref()
                    .is_some_and(|open| open.id == event_id);
                if detail_is_open {
                    self.open_event = updated.find_event(event_id).cloned();
                }
                self.trip = Some(updated);
                self.notify();
            }
            UpdateStatus::NoSuchEvent => {
                tracing::warn!(event_id, "expense edit targeted an unknown event");
            }
        }

        status
    }

    fn notify(&mut self) {
        self.version_tx.send_modify(|v| *v += 1);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Next-stop tip for a day's timeline, derived from the second event.
#[derive(Debug, Clone, PartialEq)]
pub struct NavHint {
    pub next_location: String,
    pub estimated_time: String,
    pub estimated_arrival: String,
    pub distance: String,
    pub traffic: TrafficStatus,
}

/// Compute the navigation tip shown under a day's timeline. Falls back to
/// placeholder estimates when the extraction left the hints empty.
pub fn nav_hint(day: &Day) -> Option<NavHint> {
    if day.events.len() < 2 {
        return None;
    }
    let next = &day.events[1];
    Some(NavHint {
        next_location: next.activity.clone(),
        estimated_time: next
            .estimated_travel_time
            .clone()
            .unwrap_or_else(|| "35 min".into()),
        estimated_arrival: next
            .estimated_arrival_time
            .clone()
            .unwrap_or_else(|| "14:30".into()),
        distance: next.distance.clone().unwrap_or_else(|| "12 km".into()),
        traffic: next.traffic_status.unwrap_or(TrafficStatus::Normal),
    })
}

/// Where to point the weather lookup for a day.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherLocation {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// Prefer the coordinates of the day's Stay event (weather matters most
/// where you sleep); fall back to the day's own coordinates. None means
/// no weather call is made at all.
pub fn weather_location(trip: &Trip, day_index: usize) -> Option<WeatherLocation> {
    let day = trip.days.get(day_index)?;

    let stay = day
        .events
        .iter()
        .find(|e| e.category == EventCategory::Stay)
        .and_then(|e| {
            e.details
                .coordinates
                .map(|c| (e.activity.clone(), c))
        });

    let (name, Coordinates { lat, lng }) = match stay {
        Some(found) => found,
        None => (day.location.clone(), day.coordinates?),
    };

    Some(WeatherLocation { name, lat, lng })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itinerary::{Details, Expense};
    use pretty_assertions::assert_eq;

    fn event(id: &str, category: EventCategory) -> Event {
        Event {
            id: id.into(),
            time: "09:00".into(),
            end_time: None,
            activity: format!("activity-{}", id),
            location: String::new(),
            notes: String::new(),
            category,
            emoji: None,
            details: Details::default(),
            expense: Expense::default(),
            estimated_travel_time: None,
            estimated_arrival_time: None,
            distance: None,
            traffic_status: None,
        }
    }

    fn day(events: Vec<Event>) -> Day {
        Day {
            date: "2025-10-28".into(),
            day_of_week: "TUE".into(),
            day_number: "28".into(),
            day_title: "day".into(),
            summary: String::new(),
            location: "仙台".into(),
            image_keyword: None,
            coordinates: Some(Coordinates {
                lat: 38.26,
                lng: 140.87,
            }),
            events,
        }
    }

    fn trip() -> Trip {
        Trip {
            trip_title: "test".into(),
            year: "2025".into(),
            month: "10月".into(),
            participants: 6,
            days: vec![day(vec![
                event("e1", EventCategory::Food),
                event("e2", EventCategory::Activity),
            ])],
        }
    }

    // ─── load lifecycle ─────────────────────────────────────────

    #[test]
    fn test_load_success_resets_selection() {
        let mut session = Session::new();
        session.select_day(3);

        let token = session.begin_load();
        assert_eq!(*session.phase(), LoadPhase::Loading);

        assert!(session.complete_load(token, Ok(trip())));
        assert_eq!(*session.phase(), LoadPhase::Ready);
        assert_eq!(session.selected_day(), 0);
        assert!(session.trip().is_some());
    }

    #[test]
    fn test_load_failure_retains_prior_trip() {
        let mut session = Session::new();
        let token = session.begin_load();
        session.complete_load(token, Ok(trip()));

        let token = session.begin_load();
        session.complete_load(token, Err(TabijiError::EmptyResult));

        assert!(matches!(session.phase(), LoadPhase::Failed(_)));
        // Stale-but-valid data stays available for rendering.
        assert!(session.trip().is_some());
    }

    #[test]
    fn test_stale_completion_discarded() {
        let mut session = Session::new();
        let old = session.begin_load();
        let new = session.begin_load();

        let mut stale = trip();
        stale.trip_title = "stale".into();

        // The older request finishes after the newer one
        assert!(session.complete_load(new, Ok(trip())));
        assert!(!session.complete_load(old, Ok(stale)));

        assert_eq!(session.trip().unwrap().trip_title, "test");
    }

    #[test]
    fn test_load_normalizes_totals() {
        let mut t = trip();
        t.days[0].events[0].expense.amount_per_person = 1000.0;
        t.days[0].events[0].expense.total = 42.0; // backend arithmetic, untrusted

        let mut session = Session::new();
        let token = session.begin_load();
        session.complete_load(token, Ok(t));

        let e = session.trip().unwrap().find_event("e1").unwrap();
        assert_eq!(e.expense.total, 6000.0);
    }

    // ─── expense edits ──────────────────────────────────────────

    #[test]
    fn test_edit_refreshes_open_detail_view() {
        let mut session = Session::new();
        let token = session.begin_load();
        session.complete_load(token, Ok(trip()));

        assert!(session.open_detail("e1"));
        assert_eq!(session.open_event().unwrap().expense.total, 0.0);

        let status = session.update_expense("e1", 3000.0, PaymentMethod::Cash, 6);
        assert_eq!(status, UpdateStatus::Applied);

        // Both views read the same post-edit state.
        assert_eq!(session.open_event().unwrap().expense.total, 18000.0);
        assert_eq!(
            session.trip().unwrap().find_event("e1").unwrap().expense.total,
            18000.0
        );
    }

    #[test]
    fn test_edit_of_other_event_leaves_detail_copy() {
        let mut session = Session::new();
        let token = session.begin_load();
        session.complete_load(token, Ok(trip()));
        session.open_detail("e1");

        session.update_expense("e2", 500.0, PaymentMethod::Card, 2);
        assert_eq!(session.open_event().unwrap().id, "e1");
        assert_eq!(session.open_event().unwrap().expense.total, 0.0);
    }

    #[test]
    fn test_edit_unknown_event_is_noop() {
        let mut session = Session::new();
        let token = session.begin_load();
        session.complete_load(token, Ok(trip()));
        let before = session.trip().unwrap().clone();

        let status = session.update_expense("ghost", 100.0, PaymentMethod::Cash, 1);
        assert_eq!(status, UpdateStatus::NoSuchEvent);
        assert_eq!(session.trip().unwrap(), &before);
    }

    #[test]
    fn test_edit_without_trip_is_noop() {
        let mut session = Session::new();
        let status = session.update_expense("e1", 100.0, PaymentMethod::Cash, 1);
        assert_eq!(status, UpdateStatus::NoSuchEvent);
    }

    #[test]
    fn test_edits_notify_subscribers() {
        let mut session = Session::new();
        let rx = session.subscribe();
        let before = *rx.borrow();

        let token = session.begin_load();
        session.complete_load(token, Ok(trip()));
        session.update_expense("e1", 100.0, PaymentMethod::Cash, 1);

        assert!(*rx.borrow() > before);
    }

    // ─── view helpers ───────────────────────────────────────────

    #[test]
    fn test_nav_hint_uses_second_event() {
        let mut d = day(vec![
            event("e1", EventCategory::Food),
            event("e2", EventCategory::Activity),
        ]);
        d.events[1].estimated_travel_time = Some("45 min".into());
        d.events[1].estimated_arrival_time = Some("11:45".into());
        d.events[1].distance = Some("31 km".into());
        d.events[1].traffic_status = Some(TrafficStatus::Congested);

        let hint = nav_hint(&d).unwrap();
        assert_eq!(hint.next_location, "activity-e2");
        assert_eq!(hint.estimated_time, "45 min");
        assert_eq!(hint.estimated_arrival, "11:45");
        assert_eq!(hint.traffic, TrafficStatus::Congested);
    }

    #[test]
    fn test_nav_hint_defaults_when_hints_missing() {
        let d = day(vec![
            event("e1", EventCategory::Food),
            event("e2", EventCategory::Activity),
        ]);
        let hint = nav_hint(&d).unwrap();
        assert_eq!(hint.estimated_time, "35 min");
        assert_eq!(hint.traffic, TrafficStatus::Normal);
    }

    #[test]
    fn test_nav_hint_none_for_single_event_day() {
        let d = day(vec![event("e1", EventCategory::Food)]);
        assert!(nav_hint(&d).is_none());
    }

    #[test]
    fn test_weather_prefers_stay_coordinates() {
        let mut t = trip();
        let mut stay = event("stay", EventCategory::Stay);
        stay.details.coordinates = Some(Coordinates {
            lat: 38.74,
            lng: 140.72,
        });
        t.days[0].events.push(stay);

        let loc = weather_location(&t, 0).unwrap();
        assert_eq!(loc.name, "activity-stay");
        assert_eq!(loc.lat, 38.74);
    }

    #[test]
    fn test_weather_falls_back_to_day_coordinates() {
        let t = trip();
        let loc = weather_location(&t, 0).unwrap();
        assert_eq!(loc.name, "仙台");
        assert_eq!(loc.lat, 38.26);
    }

    #[test]
    fn test_weather_none_without_coordinates() {
        let mut t = trip();
        t.days[0].coordinates = None;
        assert!(weather_location(&t, 0).is_none());
        assert!(weather_location(&t, 9).is_none());
    }
}
