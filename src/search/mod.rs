//! Chunk retrieval: the in-memory vector store and the question matcher.

pub mod matcher;
pub mod vector;
