pub mod ai_service;
pub mod google_auth_service;
pub mod image_service;
pub mod location_service;
pub mod pdf_service;
pub mod trip_normalizer;
