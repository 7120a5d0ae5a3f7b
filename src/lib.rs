#![doc = "The `tasktrack` library crate."]
#![doc = ""]
#![doc = "Authentication (password hashing, bearer tokens, the request gate), ownership-scoped"]
#![doc = "task operations, persistence seams, routing and error handling for the TaskTrack service."]
#![doc = "The binary (`main.rs`) only loads configuration, connects the store and runs the server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use crate::error::AppError;
pub use crate::state::AppContext;
