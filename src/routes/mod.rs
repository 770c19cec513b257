pub mod admin;
pub mod auth;
pub mod export;
pub mod google_auth;
pub mod location;
pub mod trip;
