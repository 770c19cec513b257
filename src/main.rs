use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use tripgenie_api::{db, middleware, routes};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        println!("Release mode");
    }

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);
    println!("Attempting to bind to {}:{}", host, port);

    let mongo_uri = std::env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    let client = db::mongo::create_mongo_client(&mongo_uri).await;
    println!("MongoDB connection established");

    println!("Starting HTTP server...");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .route("/health", web::get().to(|| async { "OK" }))
            .app_data(web::Data::new(client.clone()))
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/auth")
                            .route("/signup", web::post().to(routes::auth::signup))
                            .route("/signin", web::post().to(routes::auth::signin))
                            .route(
                                "/google",
                                web::get().to(routes::google_auth::google_auth_init),
                            )
                            .route(
                                "/google/callback",
                                web::get().to(routes::google_auth::google_auth_callback),
                            )
                            .service(
                                web::scope("")
                                    .wrap(middleware::auth::AuthMiddleware)
                                    .route(
                                        "/session",
                                        web::get().to(routes::auth::user_session),
                                    ),
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
                    .configure(routes::admin::config)
                    .service(
                        web::scope("/trips")
                            // Shared trips are viewable and exportable by link
                            .route("/{id}", web::get().to(routes::trip::get_by_id))
                            .route("/{id}/export", web::post().to(routes::export::export_trip))
                            // Everything else requires a session
                            .service(
                                web::scope("")
                                    .wrap(middleware::auth::AuthMiddleware)
                                    .route("/generate", web::post().to(routes::trip::generate_trip))
                                    .route("", web::get().to(routes::trip::get_user_trips))
                                    .route("/{id}", web::delete().to(routes::trip::delete_trip)),
                            ),
                    ),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
