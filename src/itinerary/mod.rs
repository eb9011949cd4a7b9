// src/itinerary/mod.rs — Typed itinerary data model

pub mod schema;

use serde::{Deserialize, Serialize};

/// Root aggregate: one trip, its days in calendar order.
///
/// This is the shape every extraction result and every session read/write
/// conforms to. Edits never mutate a `Trip` in place; the ledger produces a
/// new value and the session swaps it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub trip_title: String,
    #[serde(default)]
    pub year: String,
    /// Display label for the primary month, e.g. "10月".
    #[serde(default)]
    pub month: String,
    /// Traveler headcount. Default divisor for expenses without an explicit
    /// people count. Must be > 0.
    #[serde(default = "default_participants")]
    pub participants: u32,
    pub days: Vec<Day>,
}

fn default_participants() -> u32 {
    6
}

impl Trip {
    /// Look up an event by id, scanning days in order.
    pub fn find_event(&self, event_id: &str) -> Option<&Event> {
        self.days
            .iter()
            .flat_map(|d| d.events.iter())
            .find(|e| e.id == event_id)
    }
}

/// One calendar day of the trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    pub date: String,
    /// 3-letter uppercase English abbreviation, e.g. "TUE".
    #[serde(default)]
    pub day_of_week: String,
    /// Day of month as digits, e.g. "28".
    #[serde(default)]
    pub day_number: String,
    #[serde(default)]
    pub day_title: String,
    #[serde(default)]
    pub summary: String,
    /// Primary location name for the day.
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// The atomic itinerary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Stable identifier, unique within the trip. Join key for ledger
    /// updates; immutable once assigned. The extraction pipeline fills in
    /// a deterministic fallback when the backend omits one.
    #[serde(default)]
    pub id: String,
    /// Start time, HH:MM.
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// Concise official place/shop name. Long descriptions belong in notes.
    pub activity: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub notes: String,
    pub category: EventCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default)]
    pub details: Details,
    #[serde(default)]
    pub expense: Expense,

    // Navigation hints, derived by extraction from the previous event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_travel_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_arrival_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traffic_status: Option<TrafficStatus>,
}

/// Closed category set. Unrecognized values from the extraction backend
/// fall back to `Other` rather than failing the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventCategory {
    Transport,
    Food,
    Activity,
    Stay,
    #[serde(other)]
    Other,
}

/// Three-level traffic estimate. Unrecognized values fall back to `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficStatus {
    Moderate,
    Congested,
    #[serde(other)]
    Normal,
}

/// How an expense was settled. Unrecognized values fall back to `Cash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Card,
    #[serde(other)]
    Cash,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        Self::Cash
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cash => write!(f, "CASH"),
            Self::Card => write!(f, "CARD"),
        }
    }
}

/// Per-event expense record.
///
/// `total` is derived: every write recomputes it as
/// `amount_per_person * people_count` — it is never trusted from the
/// extraction backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(default)]
    pub amount_per_person: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub method: PaymentMethod,
    #[serde(default)]
    pub is_estimate: bool,
    /// 0 means "use the trip headcount".
    #[serde(default)]
    pub people_count: u32,
    #[serde(default)]
    pub total: f64,
}

fn default_currency() -> String {
    "JPY".into()
}

impl Default for Expense {
    fn default() -> Self {
        Self {
            amount_per_person: 0.0,
            currency: default_currency(),
            method: PaymentMethod::Cash,
            is_estimate: false,
            people_count: 0,
            total: 0.0,
        }
    }
}

impl Expense {
    /// The divisor actually used for totals: the explicit people count, or
    /// the trip headcount when the count is absent (0).
    pub fn effective_people(&self, participants: u32) -> u32 {
        if self.people_count == 0 {
            participants
        } else {
            self.people_count
        }
    }
}

/// Category-specific facts. All fields optional; consumers render whatever
/// is present and must never fault on absence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Details {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub japanese_name: Option<String>,
    /// Reading of the Japanese name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hiragana: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Prioritized for in-car navigation input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    /// Regular closing days, e.g. "週一公休".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holidays: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_order: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tabelog_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_reserved: Option<bool>,

    // Lodging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rooms: Option<Vec<Room>>,
    /// Legacy single-room fallback kept for older sheet layouts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    /// e.g. "素泊", "一泊二食".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_plan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onsen: Option<Onsen>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_activities: Option<Vec<HotelActivity>>,

    // Dining
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popular_dishes: Option<Vec<Dish>>,

    // Transport
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_info: Option<TransportInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_rental: Option<CarRental>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Onsen {
    /// 貸切風呂
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_private_bath: Option<bool>,
    /// 露天風呂
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_open_air: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bath_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender_swap: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_bath_fee: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelActivity {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A popular dish: original menu name and its translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub original: String,
    pub translated: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_terminal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_terminal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarRental {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropoff_location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}
