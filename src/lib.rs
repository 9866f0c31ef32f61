//! Severe weather alert dispatcher.
//!
//! Scans the subscriber directory, checks every watched location for severe
//! weather and pushes an alert to the subscriber's device.

pub mod app;
pub mod directory;
pub mod dispatcher;
pub mod domain;
pub mod push_client;
pub mod routes;
pub mod weather_client;
