use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One generated trip, written once to the `AiTrips` collection at generation
/// time and never updated in place. Deleted only by its owner or an admin.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TripDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "userEmail")]
    pub user_email: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(rename = "userSelection")]
    pub user_selection: UserSelection,
    #[serde(rename = "tripData")]
    pub trip_data: TripData,
    #[serde(rename = "locationImages", default)]
    pub location_images: Vec<LocationImage>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// The trip request form inputs, stored verbatim.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UserSelection {
    pub location: String,
    #[serde(rename = "totalDays")]
    pub total_days: u32,
    pub traveler: String,
    pub budget: String,
}

/// Canonical trip content: an ordered list of day plans and a list of hotel
/// options. Entries stay loosely typed because they come from free-text AI
/// output; readers must treat every leaf field as optional. Top-level keys the
/// model returned beyond the recognized ones are carried along untouched.
///
/// Deserialization runs the canonicalizer (services::trip_normalizer), so a
/// stored document of any historical shape comes back in this shape.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TripData {
    pub itinerary: Vec<Value>,
    #[serde(rename = "hotelOptions")]
    pub hotel_options: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Externally-sourced destination photo, fetched once at trip creation and
/// frozen into the document together with its attribution.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LocationImage {
    pub id: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<ImageAttribution>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ImageAttribution {
    pub name: String,
    pub link: String,
}
