pub mod download;
pub mod google_auth;
pub mod trip;
pub mod user;
