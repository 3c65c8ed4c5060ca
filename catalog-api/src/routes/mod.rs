/// API route handlers
///
/// - `health`: Health check endpoint
/// - `products`: Owner-scoped product CRUD

pub mod health;
pub mod products;
