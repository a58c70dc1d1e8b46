//! CORS preflight handler.

use keel_core::{AuthResponseBuilder, AuthResponseHelpers};

/// Answer an `OPTIONS` request with an empty 200 and the CORS headers.
pub fn handle_preflight<B>(builder: B) -> B::Response
where
    B: AuthResponseBuilder,
{
    builder.preflight()
}
