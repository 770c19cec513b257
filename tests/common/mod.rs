use actix_web::{web, App, HttpResponse, Responder};

use tripgenie_api::middleware::admin::RequireAdmin;
use tripgenie_api::middleware::auth::AuthMiddleware;
use tripgenie_api::routes;

pub struct TestApp;

impl TestApp {
    pub fn new() -> Self {
        Self
    }

    /// Route tree mirroring the real application. Auth and admin middleware
    /// are the real ones so status codes are exercised end to end; handlers
    /// that need a live document store are replaced with mocks.
    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .route("/health", web::get().to(|| async { "OK" }))
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/auth")
                            .route("/signup", web::post().to(token_handler))
                            .route("/signin", web::post().to(token_handler))
                            .service(
                                web::scope("")
                                    .wrap(AuthMiddleware)
                                    .route("/session", web::get().to(empty_object_handler)),
                            ),
                    )
                    .service(
                        web::scope("/locations")
                            .route(
                                "/autocomplete",
                                web::get().to(routes::location::autocomplete),
                            )
                            .route("/images", web::get().to(routes::location::location_images)),
                    )
                    .service(
                        web::scope("/admin")
                            .wrap(RequireAdmin)
                            .wrap(AuthMiddleware)
                            .route("/users", web::get().to(empty_list_handler))
                            .route("/users/{uid}/admin", web::put().to(empty_object_handler))
                            .route("/trips", web::get().to(empty_list_handler))
                            .route("/trips/{id}", web::delete().to(ok_handler))
                            .route("/dashboard", web::get().to(empty_object_handler))
                            .route("/downloads", web::get().to(empty_object_handler)),
                    )
                    .service(
                        web::scope("/trips")
                            .route("/{id}", web::get().to(not_found_handler))
                            .route("/{id}/export", web::post().to(not_found_handler))
                            .service(
                                web::scope("")
                                    .wrap(AuthMiddleware)
                                    .route("/generate", web::post().to(empty_object_handler))
                                    .route("", web::get().to(empty_list_handler))
                                    .route("/{id}", web::delete().to(ok_handler)),
                            ),
                    ),
            )
    }
}

// Mock handler functions for testing
async fn ok_handler() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

async fn token_handler() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({"auth_token": "test_token"}))
}

async fn empty_list_handler() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!([]))
}

async fn empty_object_handler() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({}))
}

async fn not_found_handler() -> impl Responder {
    HttpResponse::NotFound().body("Trip not found")
}

/// Mint a real bearer token for the given identity.
pub fn bearer_token(email: &str, user_id: &str, is_admin: bool) -> String {
    std::env::set_var("JWT_SECRET", "test_secret");
    let token = tripgenie_api::routes::auth::generate_token(email, user_id, is_admin)
        .expect("failed to generate test token");
    format!("Bearer {}", token)
}
