pub mod access_token;
pub mod account_error;
pub mod anonymized_contact;
pub mod identity;
pub mod object_namespace;
pub mod password;
pub mod profile;
pub mod user_id;
