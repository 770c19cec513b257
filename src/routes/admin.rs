use actix_web::{web, HttpResponse, Responder};
use bson::doc;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::db::mongo::{
    DATABASE, DOWNLOAD_LOGS_COLLECTION, STATS_COLLECTION, TRIPS_COLLECTION, USERS_COLLECTION,
};
use crate::middleware::admin::RequireAdmin;
use crate::middleware::auth::AuthMiddleware;
use crate::models::download::{DownloadLogDocument, DownloadStats};
use crate::models::trip::TripDocument;
use crate::models::user::{UserDocument, UserSession};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            // AuthMiddleware is registered last so it runs first and
            // populates the claims RequireAdmin checks
            .wrap(RequireAdmin)
            .wrap(AuthMiddleware)
            .route("/users", web::get().to(list_users))
            .route("/users/{uid}/admin", web::put().to(toggle_admin))
            .route("/trips", web::get().to(list_trips))
            .route("/trips/{id}", web::delete().to(delete_trip))
            .route("/dashboard", web::get().to(dashboard))
            .route("/downloads", web::get().to(download_analytics)),
    );
}

#[derive(Debug, Serialize)]
pub struct ToggleAdminResponse {
    pub success: bool,
    pub message: String,
    pub uid: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

#[derive(Debug, Deserialize)]
pub struct TripQueryParams {
    search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    #[serde(rename = "totalUsers")]
    pub total_users: u64,
    #[serde(rename = "totalTrips")]
    pub total_trips: u64,
    #[serde(rename = "totalDownloads")]
    pub total_downloads: i64,
    #[serde(rename = "recentTrips")]
    pub recent_trips: Vec<TripDocument>,
}

#[derive(Debug, Serialize)]
pub struct PopularTrip {
    pub destination: String,
    pub count: u32,
}

#[derive(Debug, Serialize)]
pub struct DownloadAnalytics {
    #[serde(rename = "recentDownloads")]
    pub recent_downloads: Vec<DownloadLogDocument>,
    #[serde(rename = "popularTrips")]
    pub popular_trips: Vec<PopularTrip>,
}

/*
    GET /api/admin/users
*/
pub async fn list_users(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<UserDocument> =
        client.database(DATABASE).collection(USERS_COLLECTION);

    match collection.find(doc! {}).sort(doc! { "createdAt": -1 }).await {
        Ok(cursor) => match cursor.try_collect::<Vec<UserDocument>>().await {
            Ok(users) => {
                let sessions: Vec<UserSession> =
                    users.into_iter().map(UserSession::from).collect();
                HttpResponse::Ok().json(sessions)
            }
            Err(err) => {
                eprintln!("Failed to collect users: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to collect users")
            }
        },
        Err(err) => {
            eprintln!("Failed to fetch users: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch users")
        }
    }
}

/*
    PUT /api/admin/users/{uid}/admin — flip the admin flag
*/
pub async fn toggle_admin(data: web::Data<Arc<Client>>, path: web::Path<String>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<UserDocument> =
        client.database(DATABASE).collection(USERS_COLLECTION);

    let uid = path.into_inner();

    match collection.find_one(doc! { "_id": &uid }).await {
        Ok(Some(user)) => {
            let next = !user.is_admin;
            let update = doc! { "$set": { "isAdmin": next } };

            match collection.update_one(doc! { "_id": &uid }, update).await {
                Ok(_) => HttpResponse::Ok().json(ToggleAdminResponse {
                    success: true,
                    message: format!(
                        "User is now {}",
                        if next { "an admin" } else { "a regular user" }
                    ),
                    uid,
                    is_admin: next,
                }),
                Err(err) => {
                    eprintln!("Failed to update user: {:?}", err);
                    HttpResponse::InternalServerError().json(ToggleAdminResponse {
                        success: false,
                        message: format!("Failed to update user: {}", err),
                        uid,
                        is_admin: user.is_admin,
                    })
                }
            }
        }
        Ok(None) => HttpResponse::NotFound().body("User not found"),
        Err(err) => {
            eprintln!("Database error: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to look up user")
        }
    }
}

/*
    GET /api/admin/trips?search=
*/
pub async fn list_trips(
    data: web::Data<Arc<Client>>,
    params: web::Query<TripQueryParams>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<TripDocument> =
        client.database(DATABASE).collection(TRIPS_COLLECTION);

    match collection.find(doc! {}).await {
        Ok(cursor) => match cursor.try_collect::<Vec<TripDocument>>().await {
            Ok(mut trips) => {
                if let Some(search) = params.search.as_deref().filter(|s| !s.is_empty()) {
                    let search = search.to_lowercase();
                    trips.retain(|trip| {
                        trip.user_selection.location.to_lowercase().contains(&search)
                            || trip.user_name.to_lowercase().contains(&search)
                            || trip.user_email.to_lowercase().contains(&search)
                    });
                }

                trips.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                HttpResponse::Ok().json(trips)
            }
            Err(err) => {
                eprintln!("Failed to collect trips: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to collect trips")
            }
        },
        Err(err) => {
            eprintln!("Failed to fetch trips: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch trips")
        }
    }
}

/*
    DELETE /api/admin/trips/{id}
*/
pub async fn delete_trip(data: web::Data<Arc<Client>>, path: web::Path<String>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<TripDocument> =
        client.database(DATABASE).collection(TRIPS_COLLECTION);

    let id = path.into_inner();

    match collection.delete_one(doc! { "_id": &id }).await {
        Ok(result) => {
            if result.deleted_count == 0 {
                HttpResponse::NotFound().body("Trip not found")
            } else {
                HttpResponse::Ok().body("Trip deleted successfully")
            }
        }
        Err(err) => {
            eprintln!("Failed to delete trip: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to delete trip")
        }
    }
}

/*
    GET /api/admin/dashboard
*/
pub async fn dashboard(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();

    let users: mongodb::Collection<UserDocument> =
        client.database(DATABASE).collection(USERS_COLLECTION);
    let trips: mongodb::Collection<TripDocument> =
        client.database(DATABASE).collection(TRIPS_COLLECTION);

    let total_users = match users.count_documents(doc! {}).await {
        Ok(count) => count,
        Err(err) => {
            eprintln!("Failed to count users: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to load dashboard data");
        }
    };

    let total_trips = match trips.count_documents(doc! {}).await {
        Ok(count) => count,
        Err(err) => {
            eprintln!("Failed to count trips: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to load dashboard data");
        }
    };

    let total_downloads = download_count(&client).await;

    let recent_trips = match trips
        .find(doc! {})
        .sort(doc! { "createdAt": -1 })
        .limit(5)
        .await
    {
        Ok(cursor) => cursor.try_collect::<Vec<TripDocument>>().await.unwrap_or_else(|err| {
            eprintln!("Failed to collect recent trips: {:?}", err);
            Vec::new()
        }),
        Err(err) => {
            eprintln!("Failed to fetch recent trips: {:?}", err);
            Vec::new()
        }
    };

    HttpResponse::Ok().json(DashboardStats {
        total_users,
        total_trips,
        total_downloads,
        recent_trips,
    })
}

// Read-through on the stats counter: prefer the aggregate document, fall
// back to counting the logs and seed the document for next time
async fn download_count(client: &Client) -> i64 {
    let stats: mongodb::Collection<DownloadStats> =
        client.database(DATABASE).collection(STATS_COLLECTION);

    match stats.find_one(doc! { "_id": "downloads" }).await {
        Ok(Some(doc)) => doc.count,
        Ok(None) => {
            let logs: mongodb::Collection<DownloadLogDocument> = client
                .database(DATABASE)
                .collection(DOWNLOAD_LOGS_COLLECTION);

            let count = match logs.count_documents(doc! {}).await {
                Ok(count) => count as i64,
                Err(err) => {
                    eprintln!("Failed to count download logs: {:?}", err);
                    0
                }
            };

            let seed = DownloadStats {
                id: "downloads".to_string(),
                count,
                last_updated: Utc::now().to_rfc3339(),
            };
            if let Err(err) = stats.insert_one(&seed).await {
                eprintln!("Failed to seed download stats: {:?}", err);
            }

            count
        }
        Err(err) => {
            eprintln!("Error handling download stats: {:?}", err);
            0
        }
    }
}

/*
    GET /api/admin/downloads
*/
pub async fn download_analytics(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let logs: mongodb::Collection<DownloadLogDocument> = client
        .database(DATABASE)
        .collection(DOWNLOAD_LOGS_COLLECTION);

    let recent_downloads = match logs
        .find(doc! {})
        .sort(doc! { "timestamp": -1 })
        .limit(20)
        .await
    {
        Ok(cursor) => match cursor.try_collect::<Vec<DownloadLogDocument>>().await {
            Ok(downloads) => downloads,
            Err(err) => {
                eprintln!("Failed to collect download logs: {:?}", err);
                return HttpResponse::InternalServerError()
                    .body("Failed to load download analytics");
            }
        },
        Err(err) => {
            eprintln!("Failed to fetch download logs: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to load download analytics");
        }
    };

    // Most popular destinations among the recent downloads
    let mut counts: HashMap<String, u32> = HashMap::new();
    for download in &recent_downloads {
        *counts.entry(download.trip_destination.clone()).or_insert(0) += 1;
    }

    let mut popular_trips: Vec<PopularTrip> = counts
        .into_iter()
        .map(|(destination, count)| PopularTrip { destination, count })
        .collect();
    popular_trips.sort_by(|a, b| b.count.cmp(&a.count));
    popular_trips.truncate(5);

    HttpResponse::Ok().json(DownloadAnalytics {
        recent_downloads,
        popular_trips,
    })
}
