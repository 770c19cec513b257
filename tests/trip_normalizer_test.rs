use serde_json::{json, Value};

use tripgenie_api::models::trip::TripData;
use tripgenie_api::services::trip_normalizer::{
    canonicalize_trip_data, normalize_ai_response, NormalizeError,
};

#[test]
fn canonical_itinerary_passes_through_unchanged() {
    let itinerary = json!([
        { "day": 1, "plan": [{ "placeName": "Eiffel Tower", "time": "9:00 AM" }] },
        { "day": 2, "plan": [{ "placeName": "Louvre" }] }
    ]);

    let trip_data = canonicalize_trip_data(json!({ "itinerary": itinerary.clone() }));

    assert_eq!(Value::Array(trip_data.itinerary), itinerary);
}

#[test]
fn canonical_hotel_list_passes_through_unchanged() {
    // Array-shaped input is not touched, not even for field aliases
    let hotels = json!([{ "name": "Ritz Paris", "price": "$$$" }]);

    let trip_data = canonicalize_trip_data(json!({ "hotelOptions": hotels.clone() }));

    assert_eq!(Value::Array(trip_data.hotel_options), hotels);
}

#[test]
fn day_keyed_mapping_becomes_ordered_list() {
    let trip_data = canonicalize_trip_data(json!({
        "itinerary": {
            "Day 2": { "placeName": "Montmartre" },
            "Day 1": { "placeName": "Eiffel Tower" }
        }
    }));

    assert_eq!(trip_data.itinerary.len(), 2);
    assert_eq!(trip_data.itinerary[0]["day"], json!("1"));
    assert_eq!(trip_data.itinerary[1]["day"], json!("2"));
    assert_eq!(
        trip_data.itinerary[0]["plan"][0]["placeName"],
        json!("Eiffel Tower")
    );
}

#[test]
fn single_place_day_is_promoted_to_list() {
    let trip_data = canonicalize_trip_data(json!({
        "itinerary": { "day1": { "placeName": "Sagrada Familia" } }
    }));

    assert_eq!(trip_data.itinerary.len(), 1);
    assert!(trip_data.itinerary[0]["plan"].is_array());
    assert_eq!(trip_data.itinerary[0]["plan"].as_array().unwrap().len(), 1);
}

#[test]
fn mapping_keys_without_day_are_skipped() {
    let trip_data = canonicalize_trip_data(json!({
        "itinerary": {
            "Day 1": { "placeName": "Alhambra" },
            "notes": "pack sunscreen"
        }
    }));

    assert_eq!(trip_data.itinerary.len(), 1);
}

#[test]
fn map_sourced_places_get_field_aliases_reconciled() {
    let trip_data = canonicalize_trip_data(json!({
        "itinerary": {
            "Day 1": [{ "name": "Colosseum", "description": "Ancient amphitheatre" }]
        }
    }));

    let place = &trip_data.itinerary[0]["plan"][0];
    assert_eq!(place["placeName"], json!("Colosseum"));
    assert_eq!(place["placeDetails"], json!("Ancient amphitheatre"));
    // Original keys survive for forward compatibility
    assert_eq!(place["name"], json!("Colosseum"));
}

#[test]
fn existing_canonical_field_wins_over_alias() {
    let trip_data = canonicalize_trip_data(json!({
        "itinerary": {
            "Day 1": [{ "placeName": "Trevi Fountain", "name": "Fountain" }]
        }
    }));

    let place = &trip_data.itinerary[0]["plan"][0];
    assert_eq!(place["placeName"], json!("Trevi Fountain"));
}

#[test]
fn hotel_mapping_is_converted_in_source_order() {
    let trip_data = canonicalize_trip_data(json!({
        "hotelOptions": {
            "second": { "name": "Hotel B", "address": "2 Rue B", "geo": { "lat": 1.0 } },
            "first": { "name": "Hotel A" }
        }
    }));

    assert_eq!(trip_data.hotel_options.len(), 2);
    assert_eq!(trip_data.hotel_options[0]["hotelName"], json!("Hotel B"));
    assert_eq!(trip_data.hotel_options[0]["hotelAddress"], json!("2 Rue B"));
    assert_eq!(trip_data.hotel_options[0]["coordinates"], json!({ "lat": 1.0 }));
    assert_eq!(trip_data.hotel_options[1]["hotelName"], json!("Hotel A"));
}

#[test]
fn missing_sections_yield_empty_lists() {
    let trip_data = canonicalize_trip_data(json!({ "summary": "a lovely trip" }));

    assert!(trip_data.itinerary.is_empty());
    assert!(trip_data.hotel_options.is_empty());
    assert_eq!(trip_data.extra["summary"], json!("a lovely trip"));
}

#[test]
fn fallback_key_sniffing_adopts_day_like_keys() {
    let trip_data = canonicalize_trip_data(json!({
        "Day Plans": [{ "day": 1, "plan": [] }],
        "accommodationChoices": [{ "hotelName": "Grand Hotel" }]
    }));

    assert_eq!(trip_data.itinerary.len(), 1);
    assert_eq!(trip_data.hotel_options.len(), 1);
    // The adopted source keys stay in place alongside the canonical sections
    assert!(trip_data.extra.contains_key("Day Plans"));
    assert!(trip_data.extra.contains_key("accommodationChoices"));
}

#[test]
fn unparseable_text_is_a_fatal_error() {
    let result = normalize_ai_response("Sorry, I could not produce a plan today.");

    assert!(matches!(
        result,
        Err(NormalizeError::MalformedResponse(_))
    ));
}

#[test]
fn non_object_json_yields_empty_trip_data() {
    let trip_data = normalize_ai_response("[1, 2, 3]").unwrap();

    assert!(trip_data.itinerary.is_empty());
    assert!(trip_data.hotel_options.is_empty());
    assert!(trip_data.extra.is_empty());
}

#[test]
fn paris_scenario_normalizes_to_canonical_shape() {
    let response = r#"{
        "itinerary": [{ "day": 1, "plan": [{ "placeName": "Eiffel Tower" }] }],
        "hotelOptions": [{ "hotelName": "Ritz Paris" }]
    }"#;

    let trip_data = normalize_ai_response(response).unwrap();

    assert_eq!(trip_data.itinerary.len(), 1);
    assert_eq!(trip_data.hotel_options.len(), 1);
    assert_eq!(trip_data.hotel_options[0]["hotelName"], json!("Ritz Paris"));
}

#[test]
fn extra_top_level_keys_are_preserved_through_serde() {
    let trip_data = canonicalize_trip_data(json!({
        "itinerary": [{ "day": 1, "plan": [] }],
        "hotelOptions": [],
        "bestTimeToVisit": "Spring"
    }));

    let value = serde_json::to_value(&trip_data).unwrap();
    assert_eq!(value["bestTimeToVisit"], json!("Spring"));
    assert!(value["itinerary"].is_array());
    assert!(value["hotelOptions"].is_array());
}

#[test]
fn deserialization_is_the_canonicalization_point() {
    // A stored document with an object-shaped itinerary comes back repaired
    let stored = json!({
        "itinerary": { "Day 1": { "placeName": "Eiffel Tower" } },
        "hotelOptions": { "a": { "name": "Ritz Paris" } }
    });

    let trip_data: TripData = serde_json::from_value(stored).unwrap();

    assert_eq!(trip_data.itinerary.len(), 1);
    assert_eq!(trip_data.itinerary[0]["day"], json!("1"));
    assert_eq!(trip_data.hotel_options[0]["hotelName"], json!("Ritz Paris"));
}

#[test]
fn canonicalization_is_idempotent() {
    let trip_data = canonicalize_trip_data(json!({
        "itinerary": { "Day 2": {}, "Day 1": {} },
        "hotelOptions": { "a": { "name": "Hotel A" } },
        "notes": "keep me"
    }));

    let round_tripped: TripData =
        serde_json::from_value(serde_json::to_value(&trip_data).unwrap()).unwrap();

    assert_eq!(round_tripped, trip_data);
}
