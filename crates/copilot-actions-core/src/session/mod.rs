//! Session tracking
//!
//! - `SessionStore` trait: create / complete / status / clear
//! - `MemorySessionStore`: the in-process implementation
//! - `CompletionPolicy`: how repeated completions of one id are resolved

mod traits;
mod memory_store;
mod policy;

pub use traits::SessionStore;
pub use memory_store::MemorySessionStore;
pub use policy::CompletionPolicy;
