// src/extract/prompt.rs — Instruction payload for the extraction backend

use chrono::{Datelike, Days, NaiveDate};

use super::ExtractionSpec;

/// System instruction for the structured-generation call.
pub fn system_instruction(language: &str) -> String {
    format!(
        "You are a travel expert. Output JSON only. Use {} for descriptions.",
        language
    )
}

/// The day-number → absolute date/weekday table, computed from the anchor
/// date (the real calendar date of Day 1).
pub fn calendar_table(anchor: NaiveDate, day_count: u32) -> String {
    let mut lines = Vec::with_capacity(day_count as usize);
    let mut prev_month = anchor.month();

    for n in 0..day_count {
        let date = anchor
            .checked_add_days(Days::new(n as u64))
            .unwrap_or(anchor);
        let weekday = date.format("%a").to_string().to_uppercase();
        let mut line = format!("       - **Day {}**: {} ({})", n + 1, date.day(), weekday);
        if date.month() != prev_month {
            line.push_str(&format!(" [{}]", date.format("%B")));
            prev_month = date.month();
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// Display label for the trip's primary month, e.g. "10月".
pub fn month_label(anchor: NaiveDate) -> String {
    format!("{}月", anchor.month())
}

/// Full extraction instruction: calendar mapping, normalization rules,
/// mandatory-field rules, navigation estimates, category hints, then the
/// raw CSV.
pub fn build_instruction(csv_text: &str, spec: &ExtractionSpec) -> String {
    let anchor = spec.anchor_date;
    let calendar = calendar_table(anchor, spec.day_count);
    let month = month_label(anchor);

    format!(
        r#"
    You are an expert travel assistant. Analyze the following CSV travel itinerary for a group trip of {participants} people.

    Your task is to convert this raw data into a rich, structured JSON itinerary.

    CRITICAL INSTRUCTIONS:
    1. **Dates & Calendar**:
       - The trip starts on **{anchor_long}**.
{calendar}
       - 'dayNumber': Just the digit (e.g., "28", "1").
       - 'dayOfWeek': 3-letter UPPERCASE English Abbreviation (e.g., TUE, WED).
       - 'month': "{month}" (Primary month).

    2. **Activity Titles**:
       - 'activity' field MUST be the concise official name of the location or shop.
       - Do NOT use sentences. Move descriptions to 'notes'.

    3. **Japanese Data**:
       - 'japaneseName' (Kanji) and 'hiragana' (Reading) are MANDATORY for all Japanese locations.

    4. **Universal Business Info (Restaurants & Spots)**:
       - **MANDATORY**: Extract or Estimate 'openingHours', 'holidays' (Regular closing days like "週一公休"), and 'lastOrder' (for restaurants).
       - 'phoneNumber' is Crucial for Car Navigation.

    5. **Navigation**:
       - 'estimatedArrivalTime': Calculate the likely arrival time at this location based on previous event + travel time (Format HH:MM).
       - 'trafficStatus': Estimate realistic traffic based on location/time. Use 'normal' (Green), 'moderate' (Orange), or 'congested' (Red).

    6. **Hotels & Onsen**:
       - 'rooms': Extract distinct room types.
       - 'mealPlan': Extract specific meal info (e.g., "素泊", "一泊二食").
       - 'onsen': Look for "貸切", "露天".

    7. **Restaurants**:
       - 'tabelogUrl': If not provided, generate a search URL.

    CSV Data:
    ```csv
    {csv_text}
    ```
  "#,
        participants = spec.participants,
        anchor_long = anchor.format("%B %-d, %Y"),
        calendar = calendar,
        month = month,
        csv_text = csv_text,
    )
}
