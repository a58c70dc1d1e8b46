pub mod use_cases;

pub use use_cases::{
    ChangePasswordUseCase, InvalidateAccountUseCase, MISSING_AUTHORIZATION, Notice, ProfileEditor,
    ProfileForm, SelfDeletionUseCase, UNKNOWN_SUBJECT, authenticate_caller, confirm_profile,
};
