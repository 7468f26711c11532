//! Retrieval and query-orchestration core for document question answering.
//!
//! Splits an extracted document into overlapping chunks, indexes their
//! embeddings in a per-request in-memory vector index, and answers a batch
//! of questions by retrieving relevant fragments and handing them to a
//! generative model. The external collaborators (document fetch, text
//! extraction, embedding, answer generation) are ports ([`ports`]) injected
//! into the services, so tests substitute fakes and the surrounding
//! application picks real adapters.

pub mod chunker;
pub mod config;
pub mod domain;
pub mod error;
pub mod index;
pub mod ports;
pub mod retrieval;
pub mod services;

pub use error::{DocqaError, Result};
