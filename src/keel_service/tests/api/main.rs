mod change_password;
mod helpers;
mod invalidation;
mod preflight;
mod self_deletion;
