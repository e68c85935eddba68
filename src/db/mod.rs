//! Vector store clients.
//!
//! The production store is a remote Supabase/pgvector instance reached over
//! PostgREST ([`supabase`]); [`vectorstore`] holds the `VectorStore` trait
//! and an in-memory implementation that mirrors its contract for tests.
//!
//! Rows in the backing store are written by a separate offline ingestion
//! tool. The only contract shared with it is the row schema: each row
//! exposes a `content` text field and an `embedding` vector compatible with
//! the similarity search.

pub mod supabase;
pub mod vectorstore;

pub use supabase::SupabaseVectorStore;
pub use vectorstore::{InMemoryVectorStore, VectorStore};
