//! # Quillpress Core
//!
//! The domain layer of the Quillpress publishing backend.
//! This crate contains the content intake pipeline and the store port,
//! with zero infrastructure dependencies.
//!
//! Write path: [`intake::repair`] -> [`intake::schema`] ->
//! [`intake::normalize`] -> [`ports::PostStore`]. Read path:
//! [`ports::PostStore`] -> [`segment`]. The composition lives in
//! [`pipeline`].

pub mod domain;
pub mod error;
pub mod intake;
pub mod pipeline;
pub mod ports;
pub mod segment;

pub use error::PipelineError;
