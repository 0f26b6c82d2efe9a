//! The customer portal of the DataPack gateway.
//!
//! A thin actix-web layer over [`datapack_engine`]: customers authenticate with their phone number and password,
//! receive a signed access token, and use it to read their account, browse the active catalog, and place orders.
//! All business rules live in the engine; this crate only translates HTTP into engine calls and engine errors
//! into HTTP statuses.

pub mod auth;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
