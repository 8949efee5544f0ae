//! HTTP middleware and extractors.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transaction per route)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (recorded in the span, echoed in the response)
//! 4. Rate limiting on `/auth/*` (governor), when enabled

pub mod auth;
pub mod rate_limit;
pub mod request_id;

pub use auth::RequireAuth;
pub use rate_limit::auth_rate_limiter;
pub use request_id::request_id_middleware;
