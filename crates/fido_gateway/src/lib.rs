pub mod client;
pub mod server;
pub mod store;
pub mod types;

pub use client::HttpSequenceStore;
pub use server::StoreServer;
pub use store::{MemoryStore, SequenceStore};
