use actix_web::{http::header, web, HttpResponse, Responder};
use bson::doc;
use chrono::Utc;
use mongodb::Client;
use oauth2::AuthorizationCode;
use std::sync::Arc;

use crate::db::mongo::{DATABASE, USERS_COLLECTION};
use crate::models::google_auth::GoogleAuthCallbackParams;
use crate::models::user::UserDocument;
use crate::routes::auth::generate_token;
use crate::services::google_auth_service::{
    create_google_oauth_client, exchange_code_for_token, get_google_auth_url, get_google_user_info,
};

// Initiate Google OAuth flow
pub async fn google_auth_init() -> impl Responder {
    println!("Initiating Google OAuth flow...");
    let client = create_google_oauth_client();
    let (auth_url, _csrf_token) = get_google_auth_url(&client);

    // In a production app, the CSRF token should be stored in a secure
    // session or encrypted cookie and validated in the callback

    HttpResponse::Found()
        .insert_header((header::LOCATION, auth_url.to_string()))
        .finish()
}

// Handle Google OAuth callback
pub async fn google_auth_callback(
    data: web::Data<Arc<Client>>,
    query: web::Query<GoogleAuthCallbackParams>,
) -> impl Responder {
    if let Some(error) = &query.error {
        eprintln!("OAuth error received: {}", error);
        return HttpResponse::BadRequest().body(format!("OAuth error: {}", error));
    }

    let oauth_client = create_google_oauth_client();
    let code = AuthorizationCode::new(query.code.clone());

    let access_token = match exchange_code_for_token(&oauth_client, code).await {
        Ok(token) => token,
        Err(e) => {
            eprintln!("Failed to exchange code for token: {}", e);
            return HttpResponse::InternalServerError().body(format!("Token error: {}", e));
        }
    };

    let user_info = match get_google_user_info(&access_token).await {
        Ok(info) => info,
        Err(e) => {
            eprintln!("Failed to get user info: {}", e);
            return HttpResponse::InternalServerError().body(format!("User info error: {}", e));
        }
    };

    let db_client = data.into_inner();
    let collection: mongodb::Collection<UserDocument> =
        db_client.database(DATABASE).collection(USERS_COLLECTION);

    let filter = doc! { "email": &user_info.email };
    let now = Utc::now();

    match collection.find_one(filter.clone()).await {
        Ok(Some(existing_user)) => {
            // Returning user, refresh their sign-in information
            let update = doc! {
                "$set": {
                    "lastLogin": now.to_rfc3339(),
                    "failedSignins": 0
                }
            };

            if let Err(err) = collection.update_one(filter, update).await {
                eprintln!("Failed to update user sign-in info: {:?}", err);
                return HttpResponse::InternalServerError().body("Failed to update user");
            }

            match generate_token(
                &existing_user.email,
                &existing_user.uid,
                existing_user.is_admin,
            ) {
                Ok(token) => redirect_with_token(token),
                Err(_) => HttpResponse::InternalServerError().body("Failed to generate token"),
            }
        }
        Ok(None) => {
            // First sign-in, create the user document
            let new_user = UserDocument {
                uid: user_info.id.clone(),
                email: user_info.email.clone(),
                display_name: user_info.name.clone(),
                photo_url: user_info.picture.clone(),
                is_admin: false,
                // No local credentials for users who sign in with Google
                password_hash: None,
                failed_signins: Some(0),
                created_at: Some(now),
                last_login: Some(now),
            };

            match collection.insert_one(&new_user).await {
                Ok(_) => match generate_token(&new_user.email, &new_user.uid, new_user.is_admin) {
                    Ok(token) => redirect_with_token(token),
                    Err(_) => HttpResponse::InternalServerError().body("Failed to generate token"),
                },
                Err(err) => {
                    eprintln!("Failed to create user: {:?}", err);
                    HttpResponse::InternalServerError().body("Failed to create user")
                }
            }
        }
        Err(err) => {
            eprintln!("Database error: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to look up user")
        }
    }
}

fn redirect_with_token(token: String) -> HttpResponse {
    let frontend_url =
        std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let redirect_url = format!("{}/?token={}", frontend_url, token);

    HttpResponse::Found()
        .insert_header((header::LOCATION, redirect_url))
        .finish()
}
