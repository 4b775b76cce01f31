#![deny(unexpected_cfgs)]
//
#![warn(clippy::cargo)]
#![warn(clippy::nursery)]
//
// https://github.com/rust-lang/rust-clippy/issues/16440
#![allow(clippy::multiple_crate_versions)]

//! Client for Slack's Incoming WebHook API.
//!
//! Build a [`Message`], decorate it with [`Attachment`]s and [`Field`]s,
//! then deliver it with a [`WebhookClient`].
//!
//! See <https://api.slack.com/incoming-webhooks>

mod json_util;

pub mod client;
pub mod message;

pub use client::{Error, WebhookClient, poster::PostResponse, poster::Poster};
pub use json_util::improve_json_error;
pub use message::{Attachment, Color, Field, Message};
