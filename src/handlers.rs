pub mod auth;
pub mod dashboard;
pub mod movements;
pub mod products;
pub mod requests;
pub mod shipments;
pub mod stores;
pub mod users;
