pub mod admin;
pub mod auth;
pub mod photos;
pub mod players;
