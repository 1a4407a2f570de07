//! Account state: the durable container, the per-module storage arena,
//! and the notification log.

mod account;
mod arena;
mod events;

pub use account::AccountState;
pub use arena::StorageArena;
pub use events::AccountEvent;
