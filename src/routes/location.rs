use actix_web::{web, HttpResponse, Responder};

use crate::models::trip::LocationImage;
use crate::services::image_service::ImageService;
use crate::services::location_service::{LocationService, LocationSuggestion};

// The autocomplete box fires on every keystroke; don't bother the provider
// until the query can rank anything
const MIN_QUERY_LENGTH: usize = 3;

#[derive(serde::Deserialize)]
pub struct AutocompleteParams {
    q: String,
    limit: Option<u32>,
}

#[derive(serde::Deserialize)]
pub struct ImagesParams {
    q: String,
    count: Option<u32>,
}

/*
    GET /api/locations/autocomplete?q=
*/
pub async fn autocomplete(params: web::Query<AutocompleteParams>) -> impl Responder {
    if params.q.trim().len() < MIN_QUERY_LENGTH {
        return HttpResponse::Ok().json(Vec::<LocationSuggestion>::new());
    }

    let service = match LocationService::new() {
        Ok(service) => service,
        Err(err) => {
            eprintln!("Location search unavailable: {}", err);
            return HttpResponse::InternalServerError().body("Location search is not configured");
        }
    };

    match service
        .autocomplete(params.q.trim(), params.limit.unwrap_or(5))
        .await
    {
        Ok(suggestions) => HttpResponse::Ok().json(suggestions),
        Err(err) => {
            eprintln!("Error fetching location suggestions: {}", err);
            HttpResponse::InternalServerError().body("Error fetching location suggestions")
        }
    }
}

/*
    GET /api/locations/images?q=
*/
pub async fn location_images(params: web::Query<ImagesParams>) -> impl Responder {
    if params.q.trim().is_empty() {
        return HttpResponse::Ok().json(Vec::<LocationImage>::new());
    }

    let service = match ImageService::new() {
        Ok(service) => service,
        Err(err) => {
            eprintln!("Image search unavailable: {}", err);
            return HttpResponse::InternalServerError().body("Image search is not configured");
        }
    };

    match service
        .search_location_images(params.q.trim(), params.count.unwrap_or(5))
        .await
    {
        Ok(images) => HttpResponse::Ok().json(images),
        Err(err) => {
            eprintln!("Error fetching location images: {}", err);
            HttpResponse::InternalServerError().body("Failed to fetch location images")
        }
    }
}
