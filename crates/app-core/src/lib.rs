//! Core application logic for the Plant Disease app
//!
//! This crate contains the agriculture news feed retriever and the
//! photo capture flow used by the diagnostics screen.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod diagnostics;
pub mod news;
