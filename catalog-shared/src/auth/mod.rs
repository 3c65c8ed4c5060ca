/// Authentication utilities
///
/// - [`jwt`]: HS256 token creation and validation
/// - [`middleware`]: Axum middleware turning a Bearer token into an
///   [`middleware::AuthContext`]
///
/// Token issuance (login, registration) happens upstream; this crate only
/// verifies tokens.

pub mod jwt;
pub mod middleware;
