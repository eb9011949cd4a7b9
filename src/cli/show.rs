// src/cli/show.rs — Day timeline view

use crate::itinerary::{Day, Event, EventCategory, Trip};
use crate::session::{self, Session};
use crate::weather::{WeatherClient, WeatherKind};

/// Print one day of the itinerary: header, weather strip, timeline,
/// next-stop tip.
pub async fn run_show(session: &Session, day_arg: usize) -> anyhow::Result<()> {
    super::print_error_banner(session);

    let Some(trip) = session.trip() else {
        anyhow::bail!("No itinerary available.");
    };

    let index = day_arg.saturating_sub(1).min(trip.days.len().saturating_sub(1));
    let Some(day) = trip.days.get(index) else {
        anyhow::bail!("The itinerary has no days.");
    };

    print_header(trip, day);
    print_weather(trip, index).await;
    print_timeline(trip, day);

    if let Some(hint) = session::nav_hint(day) {
        println!();
        println!("→ 前往下一站: {}", hint.next_location);
        println!(
            "  預計抵達: {} (距離 {}) {} [{:?}]",
            hint.estimated_arrival, hint.distance, hint.estimated_time, hint.traffic
        );
    }

    Ok(())
}

fn print_header(trip: &Trip, day: &Day) {
    println!();
    println!("  {}  {} {}", trip.trip_title, trip.year, trip.month);
    println!("  {} travelers", trip.participants);
    println!();
    println!(
        "━━ {} ({}) — {} ━━",
        day.date, day.day_of_week, day.day_title
    );
    if !day.summary.is_empty() {
        println!("   {}", day.summary);
    }
}

async fn print_weather(trip: &Trip, day_index: usize) {
    // No coordinates anywhere ⇒ no call, no output.
    let Some(location) = session::weather_location(trip, day_index) else {
        return;
    };

    match WeatherClient::new()
        .hourly_forecast(location.lat, location.lng)
        .await
    {
        Ok(forecast) => {
            println!();
            println!("  {} 未來 24 小時預報", location.name);
            let mut cells = Vec::new();
            for (i, t) in forecast.time.iter().enumerate() {
                let Some(hour) = parse_hour(t) else { continue };
                // Daylight hours only
                if !(6..=21).contains(&hour) {
                    continue;
                }
                let temp = forecast.temperature_2m.get(i).copied().unwrap_or(0.0);
                let kind = forecast
                    .weathercode
                    .get(i)
                    .map(|c| WeatherKind::from_code(*c))
                    .unwrap_or(WeatherKind::Clear);
                cells.push(format!("{:02}:00 {} {:.0}°", hour, kind.glyph(), temp));
            }
            println!("  {}", cells.join("  "));
        }
        Err(e) => {
            tracing::warn!("weather lookup skipped: {}", e);
        }
    }
}

fn print_timeline(trip: &Trip, day: &Day) {
    println!();
    for event in &day.events {
        println!("{}", format_event_line(trip, event));
        if !event.notes.is_empty() {
            println!("           {}", event.notes);
        }
        if let Some(name) = &event.details.japanese_name {
            let reading = event.details.hiragana.as_deref().unwrap_or("");
            println!("           {} {}", name, reading);
        }
        if let Some(phone) = &event.details.phone_number {
            println!("           ☎ {}", phone);
        }
    }
}

fn format_event_line(trip: &Trip, event: &Event) -> String {
    let glyph = event
        .emoji
        .clone()
        .unwrap_or_else(|| category_glyph(event.category).into());

    let mut line = format!("  {}  {} {}", event.time, glyph, event.activity);

    if event.expense.amount_per_person > 0.0 {
        let people = event.expense.effective_people(trip.participants);
        line.push_str(&format!(
            "  ¥{} × {} ({})",
            event.expense.amount_per_person, people, event.expense.method
        ));
    }

    line
}

fn category_glyph(category: EventCategory) -> &'static str {
    match category {
        EventCategory::Transport => "🚗",
        EventCategory::Food => "🍴",
        EventCategory::Activity => "⛰",
        EventCategory::Stay => "🏨",
        EventCategory::Other => "•",
    }
}

fn parse_hour(timestamp: &str) -> Option<u32> {
    let (_, time) = timestamp.split_once('T')?;
    time.get(..2)?.parse().ok()
}
