//! Core of a desktop HTTP request composer.
//!
//! A user builds a request (method, URL, headers, body), sends it, and sees
//! the response or a diagnosis of why none arrived. Requests can be grouped
//! into named collections. A configurable delay holds a received result back
//! behind a visible countdown before it is revealed.
//!
//! Everything here is independent of the UI: [`session::Session`] performs
//! the state transitions, [`http::client::Dispatcher`] runs one attempt
//! against a [`http::transport::Transport`].

pub mod builder;
pub mod collections;
pub mod config;
pub mod error;
pub mod http;
pub mod id;
pub mod logging;
pub mod reveal;
pub mod session;
pub mod store;
