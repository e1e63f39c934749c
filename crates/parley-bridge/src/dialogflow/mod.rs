//! Google Dialogflow ES client.
//!
//! Implements [`NluClient`](crate::NluClient) over the v2 REST
//! `detectIntent` endpoint, authenticating with a service account.

mod api;
mod auth;
mod client;
mod config;

pub use client::DialogflowClient;
pub use config::DialogflowConfig;
