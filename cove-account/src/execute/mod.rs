//! Operation validation and execution.
//!
//! The executor authenticates a submitted operation through
//! [`validate_operation`], then [`execute_operation`] consumes the nonce
//! and routes the call payload to a built-in entry point or to the module
//! dispatcher.

mod builtin;
mod context;
mod executor;
mod ownership;
mod validate;

pub use builtin::{
    add_module_selector, execute_selector, remove_module_selector, transfer_ownership_selector,
    AddModuleArgs, ExecuteArgs, RemoveModuleArgs, TransferOwnershipArgs,
};
pub use context::CallContext;
pub use executor::{execute_operation, OperationOutcome};
pub use ownership::transfer_ownership;
pub use validate::{validate_operation, ValidationCode};
