use std::error::Error;
use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::{json, Map, Value};

use crate::models::trip::TripData;

#[derive(Debug)]
pub enum NormalizeError {
    MalformedResponse(String),
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizeError::MalformedResponse(err) => {
                write!(f, "Malformed AI response: {}", err)
            }
        }
    }
}

impl Error for NormalizeError {}

/// Parse raw generative-model output and reshape it into the canonical trip
/// schema. A parse failure is fatal to the generation attempt: the caller
/// surfaces it to the user and writes nothing. Missing itinerary or hotel
/// data is not an error and yields empty lists.
pub fn normalize_ai_response(text: &str) -> Result<TripData, NormalizeError> {
    let raw: Value =
        serde_json::from_str(text).map_err(|e| NormalizeError::MalformedResponse(e.to_string()))?;

    Ok(canonicalize_trip_data(raw))
}

/// Reshape an arbitrary trip payload into canonical form. Runs on the write
/// path for fresh AI output and on every read as a repair step, so documents
/// stored by older normalizer versions come back in today's shape.
pub fn canonicalize_trip_data(raw: Value) -> TripData {
    let mut map = match raw {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    let itinerary =
        canonicalize_itinerary(take_section(&mut map, "itinerary", &["day", "itinerary"]));
    let hotel_options =
        canonicalize_hotels(take_section(&mut map, "hotelOptions", &["hotel", "accommodation"]));

    TripData {
        itinerary,
        hotel_options,
        extra: map,
    }
}

// Stored trip data has no shape guarantee, so deserialization itself is the
// single canonicalization point shared by every reader.
impl<'de> Deserialize<'de> for TripData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Ok(canonicalize_trip_data(raw))
    }
}

/// Pull the section stored under `canonical` out of the payload. When the
/// literal key is missing, the first top-level key containing one of the
/// fallback needles (case-insensitive, source key order) is adopted; the
/// adopted source key itself stays in place.
fn take_section(map: &mut Map<String, Value>, canonical: &str, needles: &[&str]) -> Option<Value> {
    if map.contains_key(canonical) {
        return map.remove(canonical);
    }

    let found = map
        .keys()
        .find(|key| {
            let lower = key.to_lowercase();
            needles.iter().any(|needle| lower.contains(needle))
        })
        .cloned();

    found.and_then(|key| map.get(&key).cloned())
}

fn canonicalize_itinerary(section: Option<Value>) -> Vec<Value> {
    match section {
        // Already the canonical ordered list; passed through untouched.
        Some(Value::Array(days)) => days,
        Some(Value::Object(by_day)) => {
            let non_digits = regex::Regex::new(r"\D").unwrap();

            let mut days: Vec<(Option<u64>, Value)> = Vec::new();
            for (key, value) in by_day {
                if !key.to_lowercase().contains("day") {
                    continue;
                }

                let stripped = non_digits.replace_all(&key, "").to_string();
                let (number, label) = if stripped.is_empty() {
                    (None, key.clone())
                } else {
                    (stripped.parse::<u64>().ok(), stripped)
                };

                let plan = promote_to_plan(value);
                days.push((number, json!({ "day": label, "plan": plan })));
            }

            // Numeric day keys sort ascending; keys without a number keep
            // their relative order after the numbered ones.
            days.sort_by_key(|entry| entry.0.unwrap_or(u64::MAX));
            days.into_iter().map(|(_, day)| day).collect()
        }
        _ => Vec::new(),
    }
}

fn canonicalize_hotels(section: Option<Value>) -> Vec<Value> {
    match section {
        Some(Value::Array(hotels)) => hotels,
        // Mapping values are taken in source order; hotel keys carry no
        // reliable number to sort by.
        Some(Value::Object(by_name)) => by_name
            .into_iter()
            .map(|(_, hotel)| reconcile_hotel(hotel))
            .collect(),
        _ => Vec::new(),
    }
}

/// A day's value may be a list of places or a single place object; always
/// promote to a list.
fn promote_to_plan(value: Value) -> Vec<Value> {
    match value {
        Value::Array(places) => places.into_iter().map(reconcile_place).collect(),
        Value::Object(_) => vec![reconcile_place(value)],
        other => vec![other],
    }
}

fn reconcile_place(place: Value) -> Value {
    reconcile_fields(
        place,
        &[
            ("placeName", "name"),
            ("placeDetails", "description"),
            ("placeImageUrl", "imageUrl"),
        ],
    )
}

fn reconcile_hotel(hotel: Value) -> Value {
    reconcile_fields(
        hotel,
        &[
            ("hotelName", "name"),
            ("hotelAddress", "address"),
            ("hotelImageUrl", "imageUrl"),
            ("coordinates", "geo"),
        ],
    )
}

/// Fill each canonical field from its alternate name when absent. An existing
/// canonical field wins, and every original key is preserved, recognized or
/// not.
fn reconcile_fields(entry: Value, pairs: &[(&str, &str)]) -> Value {
    match entry {
        Value::Object(mut map) => {
            for (canonical, alternate) in pairs {
                if !map.contains_key(*canonical) {
                    if let Some(value) = map.get(*alternate).cloned() {
                        map.insert((*canonical).to_string(), value);
                    }
                }
            }
            Value::Object(map)
        }
        other => other,
    }
}
