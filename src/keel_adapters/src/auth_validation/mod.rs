pub mod jwt_identity_resolver;

pub use jwt_identity_resolver::{Claims, JwtIdentityResolver, JwtValidationConfig};
