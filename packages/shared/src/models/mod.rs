pub mod timezone;
pub mod user;
