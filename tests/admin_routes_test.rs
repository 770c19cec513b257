mod common;

use actix_web::{http::header, test};
use serial_test::serial;

use common::{bearer_token, TestApp};

#[actix_rt::test]
#[serial]
async fn list_users_without_auth() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/admin/users").to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
#[serial]
async fn list_users_without_admin_flag() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let token = bearer_token("user@example.com", "user_123", false);

    let req = test::TestRequest::get()
        .uri("/api/admin/users")
        .insert_header((header::AUTHORIZATION, token))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);
}

#[actix_rt::test]
#[serial]
async fn list_users_with_admin_flag() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let token = bearer_token("admin@example.com", "admin_123", true);

    let req = test::TestRequest::get()
        .uri("/api/admin/users")
        .insert_header((header::AUTHORIZATION, token))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}

#[actix_rt::test]
#[serial]
async fn toggle_admin_without_auth() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::put()
        .uri("/api/admin/users/user_123/admin")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
#[serial]
async fn toggle_admin_without_admin_flag() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let token = bearer_token("user@example.com", "user_123", false);

    let req = test::TestRequest::put()
        .uri("/api/admin/users/user_456/admin")
        .insert_header((header::AUTHORIZATION, token))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);
}

#[actix_rt::test]
#[serial]
async fn delete_trip_without_admin_flag() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let token = bearer_token("user@example.com", "user_123", false);

    let req = test::TestRequest::delete()
        .uri("/api/admin/trips/1720000000000")
        .insert_header((header::AUTHORIZATION, token))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);
}

#[actix_rt::test]
#[serial]
async fn dashboard_without_auth() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/dashboard")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
#[serial]
async fn admin_routes_with_wrong_http_methods() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let token = bearer_token("admin@example.com", "admin_123", true);

    // Test POST on GET-only endpoint
    let req = test::TestRequest::post()
        .uri("/api/admin/users")
        .insert_header((header::AUTHORIZATION, token.clone()))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 405); // Method Not Allowed

    // Test GET on PUT-only endpoint
    let req = test::TestRequest::get()
        .uri("/api/admin/users/user_123/admin")
        .insert_header((header::AUTHORIZATION, token))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 405); // Method Not Allowed
}
