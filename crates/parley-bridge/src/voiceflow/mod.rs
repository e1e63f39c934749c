//! Voiceflow general-runtime client.
//!
//! Implements [`DialogueTransport`](crate::DialogueTransport) over
//! `POST /state/user/{session}/interact`.

mod api;
mod client;
mod config;

pub use client::VoiceflowClient;
pub use config::VoiceflowConfig;
