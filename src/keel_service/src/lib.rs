pub mod account_service;
pub mod tracing;

pub use account_service::{AccountService, CHANGE_PASSWORD_PATH, INVALIDATION_PATH, SELF_DELETION_PATH};
