// src/itinerary/schema.rs — Structured-output schema for the extraction backend

use serde_json::{json, Value};

/// Build the strict response schema submitted alongside the extraction
/// prompt. The backend is asked to emit JSON conforming exactly to this
/// shape; closed enums keep category, settlement method and traffic status
/// out of free-string territory.
pub fn trip_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "tripTitle": { "type": "STRING" },
            "year": { "type": "STRING" },
            "month": { "type": "STRING" },
            "participants": { "type": "NUMBER" },
            "days": {
                "type": "ARRAY",
                "items": day_schema(),
            },
        },
        "required": ["tripTitle", "days"],
    })
}

fn day_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "date": { "type": "STRING" },
            "dayOfWeek": { "type": "STRING" },
            "dayNumber": { "type": "STRING" },
            "dayTitle": { "type": "STRING" },
            "summary": { "type": "STRING" },
            "location": { "type": "STRING" },
            "imageKeyword": { "type": "STRING" },
            "coordinates": coordinates_schema(),
            "events": {
                "type": "ARRAY",
                "items": event_schema(),
            },
        },
        "required": ["date", "events", "coordinates"],
    })
}

fn event_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "id": { "type": "STRING" },
            "time": { "type": "STRING" },
            "endTime": { "type": "STRING" },
            "activity": { "type": "STRING" },
            "location": { "type": "STRING" },
            "notes": { "type": "STRING" },
            "category": {
                "type": "STRING",
                "enum": ["TRANSPORT", "FOOD", "ACTIVITY", "STAY", "OTHER"],
            },
            "emoji": { "type": "STRING" },
            "estimatedTravelTime": { "type": "STRING" },
            "estimatedArrivalTime": { "type": "STRING" },
            "distance": { "type": "STRING" },
            "trafficStatus": {
                "type": "STRING",
                "enum": ["normal", "moderate", "congested"],
            },
            "details": details_schema(),
            "expense": expense_schema(),
        },
        "required": ["time", "activity", "category", "details", "expense", "id"],
    })
}

fn details_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "japaneseName": { "type": "STRING" },
            "hiragana": { "type": "STRING" },
            "address": { "type": "STRING" },
            "phoneNumber": { "type": "STRING" },
            "openingHours": { "type": "STRING" },
            "holidays": { "type": "STRING" },
            "lastOrder": { "type": "STRING" },
            "reservationUrl": { "type": "STRING" },
            "tabelogUrl": { "type": "STRING" },
            "websiteUrl": { "type": "STRING" },
            "isReserved": { "type": "BOOLEAN" },
            "mealPlan": { "type": "STRING" },
            "rooms": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "imageUrl": { "type": "STRING" },
                        "link": { "type": "STRING" },
                    },
                },
            },
            "onsen": {
                "type": "OBJECT",
                "properties": {
                    "hasPrivateBath": { "type": "BOOLEAN" },
                    "hasOpenAir": { "type": "BOOLEAN" },
                    "bathName": { "type": "STRING" },
                    "hours": { "type": "STRING" },
                    "genderSwap": { "type": "STRING" },
                    "privateBathFee": { "type": "STRING" },
                },
            },
            "transportInfo": {
                "type": "OBJECT",
                "properties": {
                    "departureTerminal": { "type": "STRING" },
                    "arrivalTerminal": { "type": "STRING" },
                    "flightNumber": { "type": "STRING" },
                },
            },
            "carRental": {
                "type": "OBJECT",
                "properties": {
                    "model": { "type": "STRING" },
                    "company": { "type": "STRING" },
                    "pickupLocation": { "type": "STRING" },
                    "dropoffLocation": { "type": "STRING" },
                },
            },
            "hotelActivities": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "imageUrl": { "type": "STRING" },
                    },
                },
            },
            "popularDishes": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "original": { "type": "STRING" },
                        "translated": { "type": "STRING" },
                    },
                },
            },
            "coordinates": coordinates_schema(),
        },
    })
}

fn expense_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "amountPerPerson": { "type": "NUMBER" },
            "peopleCount": { "type": "NUMBER" },
            "total": { "type": "NUMBER" },
            "currency": { "type": "STRING" },
            "method": { "type": "STRING", "enum": ["CASH", "CARD"] },
            "isEstimate": { "type": "BOOLEAN" },
        },
    })
}

fn coordinates_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "lat": { "type": "NUMBER" },
            "lng": { "type": "NUMBER" },
        },
    })
}
