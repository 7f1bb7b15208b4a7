//! # doc-qa
//!
//! A web service that answers natural-language questions about a document.
//! Callers POST a document URL (PDF or DOCX) plus a list of questions; the
//! service retrieves the most relevant text chunks for each question by
//! cosine similarity over embeddings and asks an LLM to answer from them.
//!
//! ## Pipeline
//!
//! ```text
//!   POST /api/v1/hackrx/run
//!        │
//!        ▼
//!   ┌──────────────┐    ┌──────────────┐    ┌──────────────────┐
//!   │ Fetch + parse│ →  │ Chunk text   │ →  │ Embed chunks     │
//!   │ (PDF/DOCX)   │    │ (overlapping)│    │ (vector store)   │
//!   └──────────────┘    └──────────────┘    └────────┬─────────┘
//!                                                    │ barrier
//!               ┌────────────────────────────────────┤
//!               ▼ per question (concurrent)          ▼
//!   ┌──────────────────┐    ┌──────────────┐    ┌──────────────┐
//!   │ Embed question   │ →  │ Top-K cosine │ →  │ LLM answer   │
//!   │ (normalized)     │    │ retrieval    │    │ (grounded)   │
//!   └──────────────────┘    └──────────────┘    └──────┬───────┘
//!                                                      │
//!                                         {"answers": [..]} in input order
//! ```
//!
//! The document build phase is a synchronous barrier: no question runs until
//! the vector store is fully populated. After that the store is read-only and
//! shared by reference across concurrent question tasks. A failed or timed-out
//! LLM call for one question never fails its siblings; that entry carries an
//! error marker instead.
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for server, retrieval, and LLM settings
//! - [`error`] - `PipelineError`: one variant per failure kind, mapped to HTTP statuses
//! - [`models`] - Request/response types for the HTTP surface
//! - [`document`] - URL fetch, format detection, and PDF/DOCX text extraction
//! - [`chunking`] - Sliding-window text chunker with configurable overlap
//! - [`search::vector`] - In-memory per-request vector store with cosine top-K
//! - [`search::matcher`] - Question → query embedding → top-K chunk retrieval
//! - [`query`] - Light question normalization
//! - [`llm`] - `Embedder`/`Generator` traits and the Ollama/OpenAI-backed client
//! - [`evaluator`] - Prompt construction from matched chunks and answer post-processing
//! - [`pipeline`] - Store construction barrier and concurrent per-question answering
//! - [`api`] - Axum HTTP handlers
//! - [`state`] - Shared application state built once at startup

pub mod api;
pub mod chunking;
pub mod config;
pub mod document;
pub mod error;
pub mod evaluator;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod query;
pub mod search;
pub mod state;
