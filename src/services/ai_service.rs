use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::error::Error;
use std::fmt;

use crate::models::trip::UserSelection;

/// Prompt template sent to the generative model. The placeholders are
/// substituted with the form inputs verbatim; the model is asked for JSON so
/// the normalizer has something to parse.
const AI_PROMPT: &str = "Generate Travel Plan for Location: {location}, for {totalDays} Days for {traveler} with a {budget} budget. Give me a Hotels options list with HotelName, Hotel address, Price, hotel image url, geo coordinates, rating, descriptions and suggest itinerary with placeName, Place Details, Place Image Url, Geo Coordinates, ticket Pricing, rating, Time travel each of the location for {totalDays} days with each day plan with best time to visit. Respond in JSON format with itinerary and hotelOptions keys.";

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "topP")]
    top_p: f32,
    #[serde(rename = "topK")]
    top_k: i32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: i32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<Part>>,
}

#[derive(Debug)]
pub enum AiServiceError {
    EnvironmentError(String),
    HttpError(reqwest::Error),
    ResponseError(String),
}

impl fmt::Display for AiServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiServiceError::EnvironmentError(msg) => write!(f, "Environment error: {}", msg),
            AiServiceError::HttpError(err) => write!(f, "HTTP error: {}", err),
            AiServiceError::ResponseError(msg) => write!(f, "Response error: {}", msg),
        }
    }
}

impl Error for AiServiceError {}

impl From<reqwest::Error> for AiServiceError {
    fn from(err: reqwest::Error) -> Self {
        AiServiceError::HttpError(err)
    }
}

#[derive(Clone)]
pub struct AiService {
    client: Client,
    api_key: String,
    model: String,
}

impl AiService {
    pub fn new() -> Result<Self, AiServiceError> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| AiServiceError::EnvironmentError("GEMINI_API_KEY not set".to_string()))?;

        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-1.5-flash".to_string());

        Ok(Self {
            client: Client::new(),
            api_key,
            model,
        })
    }

    /// Substitute the form inputs into the prompt template and request a trip
    /// plan. Returns the model's raw text; the caller owns parsing it. No
    /// retry on failure, the user retries generation instead.
    pub async fn generate_trip(&self, selection: &UserSelection) -> Result<String, AiServiceError> {
        let prompt = build_prompt(selection);
        println!("Final AI prompt: {}", prompt);

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: 1.0,
                top_p: 0.95,
                top_k: 64,
                max_output_tokens: 8192,
                response_mime_type: "application/json".to_string(),
            },
        };

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(AiServiceError::ResponseError(format!(
                "Generative API returned error status: {}",
                response.status()
            )));
        }

        let body: GenerateContentResponse = response.json().await?;

        extract_text(body)
            .ok_or_else(|| AiServiceError::ResponseError("Empty model response".to_string()))
    }
}

pub fn build_prompt(selection: &UserSelection) -> String {
    AI_PROMPT
        .replace("{location}", &selection.location)
        .replace("{totalDays}", &selection.total_days.to_string())
        .replace("{traveler}", &selection.traveler)
        .replace("{budget}", &selection.budget)
}

fn extract_text(body: GenerateContentResponse) -> Option<String> {
    body.candidates?
        .into_iter()
        .next()?
        .content?
        .parts?
        .into_iter()
        .next()
        .map(|part| part.text)
}
