use actix_web::{http::header, web, HttpRequest, HttpResponse, Responder};
use bson::doc;
use chrono::Utc;
use mongodb::Client;
use serde::Deserialize;
use std::sync::Arc;

use crate::db::mongo::{DATABASE, DOWNLOAD_LOGS_COLLECTION, STATS_COLLECTION, TRIPS_COLLECTION};
use crate::middleware::auth::claims_from_request;
use crate::models::download::DownloadLogDocument;
use crate::models::trip::TripDocument;
use crate::services::pdf_service::{self, PdfExportError};

/// The browser captures the rendered trip view and posts it as a PNG data
/// URL; the server owns turning that into the PDF artifact.
#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    #[serde(rename = "imageData")]
    pub image_data: String,
}

/*
    POST /api/trips/{id}/export
*/
pub async fn export_trip(
    req: HttpRequest,
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    input: web::Json<ExportRequest>,
) -> impl Responder {
    let client = data.into_inner();
    let trips: mongodb::Collection<TripDocument> =
        client.database(DATABASE).collection(TRIPS_COLLECTION);

    let trip_id = path.into_inner();

    let trip = match trips.find_one(doc! { "_id": &trip_id }).await {
        Ok(Some(trip)) => trip,
        Ok(None) => return HttpResponse::NotFound().body("Trip not found"),
        Err(err) => {
            eprintln!("Failed to retrieve trip: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to retrieve trip");
        }
    };

    let destination = trip.user_selection.location.clone();

    let pdf_bytes = match pdf_service::render_trip_pdf(&destination, &input.image_data) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("PDF generation failed: {}", err);
            return match err {
                PdfExportError::PdfError(_) => {
                    HttpResponse::InternalServerError().body("Failed to generate PDF")
                }
                _ => HttpResponse::BadRequest().body("Invalid capture image"),
            };
        }
    };

    // Analytics are best-effort; the download succeeds regardless
    if let Some(claims) = claims_from_request(&req) {
        log_download(&client, &claims.user_id, &destination).await;
    }
    bump_download_counter(&client).await;

    HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}\"",
                pdf_service::pdf_filename(&destination)
            ),
        ))
        .body(pdf_bytes)
}

async fn log_download(client: &Client, user_id: &str, destination: &str) {
    let logs: mongodb::Collection<DownloadLogDocument> = client
        .database(DATABASE)
        .collection(DOWNLOAD_LOGS_COLLECTION);

    let log = DownloadLogDocument {
        id: None,
        user_id: user_id.to_string(),
        trip_destination: destination.to_string(),
        timestamp: Utc::now().to_rfc3339(),
    };

    if let Err(err) = logs.insert_one(&log).await {
        eprintln!("Failed to log download: {:?}", err);
    }
}

async fn bump_download_counter(client: &Client) {
    let stats: mongodb::Collection<bson::Document> =
        client.database(DATABASE).collection(STATS_COLLECTION);

    let update = doc! {
        "$inc": { "count": 1 },
        "$set": { "lastUpdated": Utc::now().to_rfc3339() }
    };

    if let Err(err) = stats
        .update_one(doc! { "_id": "downloads" }, update)
        .upsert(true)
        .await
    {
        eprintln!("Failed to update download stats: {:?}", err);
    }
}
