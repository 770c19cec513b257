mod common;

use actix_web::{http::header, test as web_test};
use serde_json::json;
use serial_test::serial;

use common::{bearer_token, TestApp};
use tripgenie_api::models::trip::UserSelection;
use tripgenie_api::routes::trip::validate_selection;

fn selection(location: &str, total_days: u32) -> UserSelection {
    UserSelection {
        location: location.to_string(),
        total_days,
        traveler: "Couple".to_string(),
        budget: "Luxury".to_string(),
    }
}

#[test]
fn six_day_trip_is_rejected_before_any_ai_call() {
    let result = validate_selection(&selection("Paris, France", 6));

    assert_eq!(
        result.unwrap_err(),
        "Trip days should not exceed 5 days".to_string()
    );
}

#[test]
fn zero_day_trip_is_rejected() {
    assert!(validate_selection(&selection("Paris, France", 0)).is_err());
}

#[test]
fn blank_location_is_rejected() {
    let result = validate_selection(&selection("   ", 3));

    assert_eq!(
        result.unwrap_err(),
        "Please fill all required fields!".to_string()
    );
}

#[test]
fn five_day_trip_passes_validation() {
    assert!(validate_selection(&selection("Paris, France", 5)).is_ok());
}

#[actix_rt::test]
#[serial]
async fn generate_trip_without_auth() {
    let test_app = TestApp::new();
    let app = web_test::init_service(test_app.create_app()).await;

    let req = web_test::TestRequest::post()
        .uri("/api/trips/generate")
        .set_json(&json!({
            "location": "Paris, France",
            "totalDays": 3,
            "traveler": "Couple",
            "budget": "Luxury"
        }))
        .to_request();

    let resp = web_test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
#[serial]
async fn generate_trip_with_invalid_token() {
    let test_app = TestApp::new();
    let app = web_test::init_service(test_app.create_app()).await;

    let req = web_test::TestRequest::post()
        .uri("/api/trips/generate")
        .insert_header((header::AUTHORIZATION, "Bearer not_a_real_token"))
        .set_json(&json!({
            "location": "Paris, France",
            "totalDays": 3,
            "traveler": "Couple",
            "budget": "Luxury"
        }))
        .to_request();

    let resp = web_test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
#[serial]
async fn generate_trip_with_valid_token() {
    let test_app = TestApp::new();
    let app = web_test::init_service(test_app.create_app()).await;

    let token = bearer_token("traveler@example.com", "user_123", false);

    let req = web_test::TestRequest::post()
        .uri("/api/trips/generate")
        .insert_header((header::AUTHORIZATION, token))
        .set_json(&json!({
            "location": "Paris, France",
            "totalDays": 3,
            "traveler": "Couple",
            "budget": "Luxury"
        }))
        .to_request();

    let resp = web_test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}

#[actix_rt::test]
#[serial]
async fn list_trips_without_auth() {
    let test_app = TestApp::new();
    let app = web_test::init_service(test_app.create_app()).await;

    let req = web_test::TestRequest::get().uri("/api/trips").to_request();

    let resp = web_test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
#[serial]
async fn delete_trip_without_auth() {
    let test_app = TestApp::new();
    let app = web_test::init_service(test_app.create_app()).await;

    let req = web_test::TestRequest::delete()
        .uri("/api/trips/1720000000000")
        .to_request();

    let resp = web_test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
#[serial]
async fn view_trip_is_public() {
    let test_app = TestApp::new();
    let app = web_test::init_service(test_app.create_app()).await;

    // No Authorization header; an unknown id reports not-found, not 401
    let req = web_test::TestRequest::get()
        .uri("/api/trips/1720000000000")
        .to_request();

    let resp = web_test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}
