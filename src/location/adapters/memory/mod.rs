//! In-memory trigger persistence.

mod trigger_store;

pub use trigger_store::{InMemoryTriggerStore, TriggerStoreOperation};
