//! HTTP handlers

pub mod collections;
pub mod learn;
pub mod topics;
pub mod words;
