//! This crate contains the core logic of the reqflow request orchestration layer.
//!
//! It sits between application code and a remote HTTP-like transport and, for
//! every outgoing call, suppresses duplicate in-flight requests, serves
//! short-lived cached responses, drives a shared loading indicator across
//! overlapping calls, and classifies heterogeneous outcomes into one taxonomy.

pub mod cache;
pub mod config;
pub mod core;
pub mod hooks;
pub mod inflight;
pub mod logging;
pub mod orchestration;
pub mod outcome;
pub mod transport;
