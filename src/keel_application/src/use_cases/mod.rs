pub mod authenticate;
pub mod change_password;
pub mod invalidate_account;
pub mod profile_editor;
pub mod self_deletion;

// Re-export for convenience
pub use authenticate::{
    MISSING_AUTHORIZATION, UNKNOWN_SUBJECT, authenticate_caller, confirm_profile,
};
pub use change_password::ChangePasswordUseCase;
pub use invalidate_account::InvalidateAccountUseCase;
pub use profile_editor::{Notice, ProfileEditor, ProfileForm};
pub use self_deletion::SelfDeletionUseCase;
