//! Editor host actions
//!
//! The pipeline and the chat tool reach the editor only through the
//! `HostActions` trait, so the same code runs against the real extension
//! (over RPC) and against a scripted mock in tests.

mod traits;
mod rpc_host;
mod mock;

pub use traits::{HostActions, NEW_CHAT_COMMAND, OPEN_CHAT_COMMAND};
pub use rpc_host::RpcHostActions;
pub use mock::{MockHostActions, MockMode, IssuedCommand};
