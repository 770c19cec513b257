use actix_web::{web, HttpResponse, Responder};
use bson::doc;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::Client;
use std::sync::Arc;

use crate::db::mongo::{DATABASE, TRIPS_COLLECTION, USERS_COLLECTION};
use crate::middleware::auth::Claims;
use crate::models::trip::{LocationImage, TripDocument, UserSelection};
use crate::models::user::UserDocument;
use crate::services::ai_service::AiService;
use crate::services::image_service::{primary_location, ImageService};
use crate::services::trip_normalizer::normalize_ai_response;

pub const MAX_TRIP_DAYS: u32 = 5;

/*
    POST /api/trips/generate
*/
pub async fn generate_trip(
    claims: web::ReqData<Claims>,
    data: web::Data<Arc<Client>>,
    input: web::Json<UserSelection>,
) -> impl Responder {
    let client = data.into_inner();
    let selection = input.into_inner();

    // Form validation happens before anything talks to the model
    if let Err(message) = validate_selection(&selection) {
        return HttpResponse::BadRequest().body(message);
    }

    let ai_service = match AiService::new() {
        Ok(service) => service,
        Err(err) => {
            eprintln!("AI service unavailable: {}", err);
            return HttpResponse::InternalServerError().body("Trip generation is not configured");
        }
    };

    let response_text = match ai_service.generate_trip(&selection).await {
        Ok(text) => text,
        Err(err) => {
            eprintln!("Error generating trip with AI: {}", err);
            return HttpResponse::InternalServerError()
                .body("Failed to generate trip itinerary. Please try again.");
        }
    };

    // A response that fails to parse kills this attempt; nothing is saved
    let trip_data = match normalize_ai_response(&response_text) {
        Ok(trip_data) => trip_data,
        Err(err) => {
            eprintln!("JSON parse error: {}", err);
            println!("Raw trip data that failed to parse: {}", response_text);
            return HttpResponse::UnprocessableEntity()
                .body("Error parsing AI response. Please try again.");
        }
    };

    let location_images = fetch_location_images(&selection.location).await;

    let users: mongodb::Collection<UserDocument> =
        client.database(DATABASE).collection(USERS_COLLECTION);
    let user_name = match users.find_one(doc! { "_id": &claims.user_id }).await {
        Ok(Some(user)) => user
            .display_name
            .unwrap_or_else(|| "Anonymous".to_string()),
        _ => "Anonymous".to_string(),
    };

    let now = Utc::now();
    let trip = TripDocument {
        id: now.timestamp_millis().to_string(),
        user_id: claims.user_id.clone(),
        user_email: claims.sub.clone(),
        user_name,
        user_selection: selection,
        trip_data,
        location_images,
        created_at: now.to_rfc3339(),
    };

    let trips: mongodb::Collection<TripDocument> =
        client.database(DATABASE).collection(TRIPS_COLLECTION);

    match trips.insert_one(&trip).await {
        Ok(_) => {
            println!("Trip saved successfully with ID: {}", trip.id);
            HttpResponse::Ok().json(trip)
        }
        Err(err) => {
            eprintln!("Error saving trip: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to save trip to database.")
        }
    }
}

/*
    GET /api/trips/{id} (public, shareable by link)
*/
pub async fn get_by_id(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<TripDocument> =
        client.database(DATABASE).collection(TRIPS_COLLECTION);

    let id = path.into_inner();

    match collection.find_one(doc! { "_id": &id }).await {
        Ok(Some(mut trip)) => {
            // Images were frozen at creation; only look again when none stuck
            if trip.location_images.is_empty() {
                trip.location_images = fetch_location_images(&trip.user_selection.location).await;
            }
            HttpResponse::Ok().json(trip)
        }
        Ok(None) => HttpResponse::NotFound().body("Trip not found"),
        Err(err) => {
            eprintln!("Failed to retrieve trip: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve trip")
        }
    }
}

/*
    GET /api/trips (the caller's trips, newest first)
*/
pub async fn get_user_trips(
    claims: web::ReqData<Claims>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<TripDocument> =
        client.database(DATABASE).collection(TRIPS_COLLECTION);

    match collection.find(doc! { "userId": &claims.user_id }).await {
        Ok(cursor) => match cursor.try_collect::<Vec<TripDocument>>().await {
            Ok(mut trips) => {
                // Sort locally; list queries carry no cross-call ordering guarantee
                trips.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                HttpResponse::Ok().json(trips)
            }
            Err(err) => {
                eprintln!("Failed to collect trips: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to collect trips")
            }
        },
        Err(err) => {
            eprintln!("Failed to retrieve trips: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve trips")
        }
    }
}

/*
    DELETE /api/trips/{id} (owner only)
*/
pub async fn delete_trip(
    claims: web::ReqData<Claims>,
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<TripDocument> =
        client.database(DATABASE).collection(TRIPS_COLLECTION);

    let id = path.into_inner();

    match collection.find_one(doc! { "_id": &id }).await {
        Ok(Some(trip)) => {
            if trip.user_id != claims.user_id {
                return HttpResponse::Forbidden().body("You can only delete your own trips");
            }

            match collection.delete_one(doc! { "_id": &id }).await {
                Ok(_) => HttpResponse::Ok().body("Trip deleted successfully"),
                Err(err) => {
                    eprintln!("Failed to delete trip: {:?}", err);
                    HttpResponse::InternalServerError().body("Failed to delete trip")
                }
            }
        }
        Ok(None) => HttpResponse::NotFound().body("Trip not found"),
        Err(err) => {
            eprintln!("Failed to retrieve trip: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve trip")
        }
    }
}

pub fn validate_selection(selection: &UserSelection) -> Result<(), String> {
    if selection.location.trim().is_empty()
        || selection.traveler.trim().is_empty()
        || selection.budget.trim().is_empty()
        || selection.total_days == 0
    {
        return Err("Please fill all required fields!".to_string());
    }

    if selection.total_days > MAX_TRIP_DAYS {
        return Err("Trip days should not exceed 5 days".to_string());
    }

    Ok(())
}

// Destination photos are best-effort; a failed lookup never blocks the trip
pub async fn fetch_location_images(location: &str) -> Vec<LocationImage> {
    let service = match ImageService::new() {
        Ok(service) => service,
        Err(err) => {
            eprintln!("Image search unavailable: {}", err);
            return Vec::new();
        }
    };

    match service
        .search_location_images(primary_location(location), 5)
        .await
    {
        Ok(images) => images,
        Err(err) => {
            eprintln!("Error fetching location images: {}", err);
            Vec::new()
        }
    }
}
