//! Lead Agents Library
//!
//! Two lead-processing flows behind one HTTP API: capture (free text to a
//! stored contact record) and qualification (enrichment, scoring, decision).
//!
//! # Modules
//!
//! - `api`: API-layer components (handlers, router).
//! - `core`: Business logic for both flows.
//! - `integrations`: Upstream model client and extraction adapters.
//! - `capture`: Lead capture service.
//! - `config`: Configuration management.
//! - `cost`: Model cost estimates.
//! - `decision`: Qualification decision rules.
//! - `enrichment`: Email-domain enrichment heuristic.
//! - `errors`: Error handling types.
//! - `events`: Lead notifications.
//! - `extraction`: Extractor trait, regex adapter and response parsing.
//! - `handlers`: HTTP request handlers.
//! - `llm_client`: OpenAI-compatible extraction client.
//! - `models`: Core data models.
//! - `normalization`: Email, phone and source normalization.
//! - `qualification`: Qualification service and summary rendering.
//! - `repository`: Lead storage.
//! - `scoring`: Qualification scoring.
//! - `server`: Router construction and middleware.

pub mod api;
pub mod core;
pub mod integrations;

// Re-export primary modules for shared use in tests and other binaries
pub mod capture;
pub mod config;
pub mod cost;
pub mod decision;
pub mod enrichment;
pub mod errors;
pub mod events;
pub mod extraction;
pub mod handlers;
pub mod llm_client;
pub mod models;
pub mod normalization;
pub mod qualification;
pub mod repository;
pub mod scoring;
pub mod server;
