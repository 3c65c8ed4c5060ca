/// Database layer for the catalog
///
/// - `pool`: PostgreSQL connection pool with health check
/// - `migrations`: embedded schema migrations
///
/// Product queries live with the model in `models::product`.

pub mod migrations;
pub mod pool;
