use reqwest::Client;
use serde::Deserialize;
use std::env;
use std::error::Error;
use std::fmt;

use crate::models::trip::{ImageAttribution, LocationImage};

#[derive(Debug, Deserialize)]
struct UnsplashSearchResponse {
    results: Vec<UnsplashPhoto>,
}

#[derive(Debug, Deserialize)]
struct UnsplashPhoto {
    id: String,
    urls: UnsplashUrls,
    alt_description: Option<String>,
    user: UnsplashUser,
}

#[derive(Debug, Deserialize)]
struct UnsplashUrls {
    regular: String,
    small: Option<String>,
    thumb: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UnsplashUser {
    name: String,
    links: UnsplashUserLinks,
}

#[derive(Debug, Deserialize)]
struct UnsplashUserLinks {
    html: String,
}

#[derive(Debug)]
pub enum ImageSearchError {
    EnvironmentError(String),
    HttpError(reqwest::Error),
    ResponseError(String),
}

impl fmt::Display for ImageSearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSearchError::EnvironmentError(msg) => write!(f, "Environment error: {}", msg),
            ImageSearchError::HttpError(err) => write!(f, "HTTP error: {}", err),
            ImageSearchError::ResponseError(msg) => write!(f, "Response error: {}", msg),
        }
    }
}

impl Error for ImageSearchError {}

impl From<reqwest::Error> for ImageSearchError {
    fn from(err: reqwest::Error) -> Self {
        ImageSearchError::HttpError(err)
    }
}

/// Destination photo search against Unsplash. Results are frozen into the
/// trip document at creation time with their attribution.
pub struct ImageService {
    client: Client,
    access_key: String,
}

impl ImageService {
    pub fn new() -> Result<Self, ImageSearchError> {
        let access_key = env::var("UNSPLASH_ACCESS_KEY").map_err(|_| {
            ImageSearchError::EnvironmentError("UNSPLASH_ACCESS_KEY not set".to_string())
        })?;

        Ok(Self {
            client: Client::new(),
            access_key,
        })
    }

    pub async fn search_location_images(
        &self,
        query: &str,
        count: u32,
    ) -> Result<Vec<LocationImage>, ImageSearchError> {
        let response = self
            .client
            .get("https://api.unsplash.com/search/photos")
            .header("Authorization", format!("Client-ID {}", self.access_key))
            .query(&[
                ("query", query),
                ("per_page", &count.to_string()),
                ("orientation", "landscape"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ImageSearchError::ResponseError(format!(
                "Unsplash returned error status: {}",
                response.status()
            )));
        }

        let body: UnsplashSearchResponse = response.json().await?;

        let images = body
            .results
            .into_iter()
            .map(|photo| LocationImage {
                id: photo.id,
                url: photo.urls.regular,
                small: photo.urls.small,
                thumb: photo.urls.thumb,
                alt: photo.alt_description.or_else(|| Some(query.to_string())),
                user: Some(ImageAttribution {
                    name: photo.user.name,
                    link: photo.user.links.html,
                }),
            })
            .collect();

        Ok(images)
    }
}

/// Main part of a location string, used as the photo search term
/// (e.g. "Paris" out of "Paris, France").
pub fn primary_location(location: &str) -> &str {
    location.split(',').next().unwrap_or(location).trim()
}
