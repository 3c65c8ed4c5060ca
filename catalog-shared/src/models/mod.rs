/// Database models for the catalog
///
/// # Models
///
/// - `product`: Catalog entries owned by a single user, plus the
///   `ProductStore` trait and its PostgreSQL and in-memory implementations
///
/// # Example
///
/// ```no_run
/// use catalog_shared::models::product::{PgProductStore, ProductInput, ProductStore};
/// use catalog_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// let store = PgProductStore::new(pool);
///
/// let product = store
///     .create(1, ProductInput {
///         name: Some("Widget".to_string()),
///         description: None,
///         price: Some(9.99),
///         stock: Some(5),
///     })
///     .await?;
/// # Ok(())
/// # }
/// ```

pub mod product;
