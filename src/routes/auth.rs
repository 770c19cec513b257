use actix_web::{web, HttpResponse, Responder};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::error::WriteError;
use mongodb::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::mongo::{DATABASE, USERS_COLLECTION};
use crate::middleware::auth::Claims;
use crate::models::user::{UserDocument, UserSession};

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    auth_token: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

pub async fn signup(data: web::Data<Arc<Client>>, input: web::Json<SignupRequest>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<UserDocument> =
        client.database(DATABASE).collection(USERS_COLLECTION);

    let input = input.into_inner();

    if !is_valid_email(&input.email) {
        return HttpResponse::BadRequest().body("Invalid email address");
    }
    if input.password.is_empty() {
        return HttpResponse::BadRequest().body("Password must not be empty");
    }

    let password_hash = match bcrypt::hash(&input.password, bcrypt::DEFAULT_COST) {
        Ok(hash) => hash,
        Err(err) => {
            eprintln!("Failed to hash password: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to create user");
        }
    };

    let now = Utc::now();
    let user = UserDocument {
        uid: ObjectId::new().to_hex(),
        email: input.email,
        display_name: input.display_name,
        photo_url: None,
        is_admin: false,
        password_hash: Some(password_hash),
        failed_signins: Some(0),
        created_at: Some(now),
        last_login: Some(now),
    };

    match collection.insert_one(&user).await {
        Ok(_) => match generate_token(&user.email, &user.uid, user.is_admin) {
            Ok(token) => HttpResponse::Ok().json(TokenResponse { auth_token: token }),
            Err(_) => HttpResponse::InternalServerError().body("Token generation failed"),
        },
        Err(err) => match *err.kind {
            mongodb::error::ErrorKind::Write(error_info) => match error_info {
                mongodb::error::WriteFailure::WriteError(WriteError { code, .. }) => {
                    if code == 11000 {
                        HttpResponse::Conflict().body("User already exists")
                    } else {
                        println!("Error code: {}", code);
                        HttpResponse::InternalServerError().body("Failed to create user")
                    }
                }
                _ => HttpResponse::InternalServerError().body("Failed to create user"),
            },
            _ => HttpResponse::InternalServerError().body("Failed to create user"),
        },
    }
}

pub async fn signin(data: web::Data<Arc<Client>>, input: web::Json<SigninRequest>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<UserDocument> =
        client.database(DATABASE).collection(USERS_COLLECTION);

    let input = input.into_inner();
    let filter = doc! { "email": &input.email };

    match collection.find_one(filter.clone()).await {
        Ok(Some(user)) => {
            // Federated accounts carry no local credentials
            let stored_hash = match &user.password_hash {
                Some(hash) => hash.clone(),
                None => return HttpResponse::Unauthorized().body("Invalid credentials"),
            };

            if bcrypt::verify(&input.password, &stored_hash).unwrap_or(false) {
                let update = doc! {
                    "$set": {
                        "lastLogin": Utc::now().to_rfc3339(),
                        "failedSignins": 0
                    }
                };

                match collection.update_one(filter, update).await {
                    Ok(_) => match generate_token(&user.email, &user.uid, user.is_admin) {
                        Ok(token) => HttpResponse::Ok().json(TokenResponse { auth_token: token }),
                        Err(_) => {
                            HttpResponse::InternalServerError().body("Token generation failed")
                        }
                    },
                    Err(err) => {
                        eprintln!("Failed to update document: {:?}", err);
                        HttpResponse::InternalServerError().body("Failed to sign in.")
                    }
                }
            } else {
                let failed_signins = user.failed_signins.unwrap_or(0) + 1;
                let update = doc! {
                    "$set": { "failedSignins": failed_signins }
                };

                match collection.update_one(filter, update).await {
                    Ok(_) => HttpResponse::Unauthorized().body("Invalid credentials"),
                    Err(err) => {
                        eprintln!("Failed to update failed signins: {:?}", err);
                        HttpResponse::InternalServerError().body("Failed to process signin")
                    }
                }
            }
        }
        Ok(None) => HttpResponse::NotFound().body("User not found"),
        Err(err) => {
            eprintln!("Database error: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to process signin")
        }
    }
}

pub async fn user_session(
    claims: web::ReqData<Claims>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<UserDocument> =
        client.database(DATABASE).collection(USERS_COLLECTION);

    match collection.find_one(doc! { "_id": &claims.user_id }).await {
        Ok(Some(user)) => HttpResponse::Ok().json(UserSession::from(user)),
        Ok(None) => HttpResponse::NotFound().body("User not found"),
        Err(err) => {
            eprintln!("Failed to fetch user: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch user")
        }
    }
}

fn is_valid_email(email: &str) -> bool {
    let re = regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?)*$",
    );
    return re.unwrap().is_match(email);
}

pub fn generate_token(
    email: &str,
    user_id: &str,
    is_admin: bool,
) -> Result<String, jsonwebtoken::errors::Error> {
    let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    let now = Utc::now();

    let claims = Claims {
        sub: email.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::hours(24)).timestamp() as usize,
        user_id: user_id.to_string(),
        is_admin,
    };

    let header = Header::new(Algorithm::HS256);
    encode(&header, &claims, &EncodingKey::from_secret(secret.as_ref()))
}
