/// Product model and persistence
///
/// A product is a catalog entry owned by exactly one user. Every read, update
/// and delete is scoped by `(id, user_id)` so a product is never visible to a
/// caller that does not own it.
///
/// Persistence goes through the [`ProductStore`] trait so the HTTP layer can
/// be driven by PostgreSQL in production and by [`InMemoryProductStore`] in
/// tests.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE products (
///     id BIGSERIAL PRIMARY KEY,
///     name TEXT NOT NULL,
///     description TEXT,
///     price DOUBLE PRECISION NOT NULL,
///     stock INTEGER NOT NULL DEFAULT 0,
///     user_id BIGINT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::PgPool;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Product model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    /// Identifier assigned by the store on creation
    pub id: i64,

    /// Display label
    pub name: String,

    /// Optional free text
    pub description: Option<String>,

    /// Unit price (non-negative expected, not enforced)
    pub price: f64,

    /// Quantity on hand
    pub stock: i32,

    /// Owning user, fixed at creation
    pub user_id: i64,

    /// When the product was created
    pub created_at: DateTime<Utc>,

    /// When the product was last updated
    pub updated_at: DateTime<Utc>,
}

/// Editable product fields as supplied by a request body
///
/// Used both for creation and update. On create, absent fields are handed to
/// the store as-is and the store decides (NOT NULL columns reject them,
/// `stock` falls back to 0). On update, absent fields keep their stored
/// value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
}

impl ProductInput {
    /// Reads the editable fields out of an arbitrary JSON request body
    ///
    /// Anything that is not a JSON object counts as `{}`. Values are coerced
    /// to their column types the way the database would cast a literal:
    /// numeric strings become numbers, numbers and booleans become text, and
    /// `null` counts as absent. A value with no such cast is reported as
    /// [`StoreError::InvalidValue`], carrying the database's wording.
    pub fn from_json(body: &Value) -> StoreResult<Self> {
        let empty = Map::new();
        let fields = body.as_object().unwrap_or(&empty);

        Ok(Self {
            name: text_field(fields.get("name"))?,
            description: text_field(fields.get("description"))?,
            price: double_field(fields.get("price"))?,
            stock: integer_field(fields.get("stock"))?,
        })
    }
}

fn invalid_syntax(type_name: &str, value: &Value) -> StoreError {
    let literal = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    StoreError::InvalidValue(format!(
        "invalid input syntax for type {}: \"{}\"",
        type_name, literal
    ))
}

fn text_field(value: Option<&Value>) -> StoreResult<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(Some(v.to_string())),
        Some(v) => Err(invalid_syntax("text", v)),
    }
}

fn double_field(value: Option<&Value>) -> StoreResult<Option<f64>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| invalid_syntax("double precision", &Value::Number(n.clone()))),
        Some(v @ Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| invalid_syntax("double precision", v)),
        Some(v) => Err(invalid_syntax("double precision", v)),
    }
}

fn integer_field(value: Option<&Value>) -> StoreResult<Option<i32>> {
    let out_of_range = |literal: String| {
        StoreError::InvalidValue(format!(
            "value \"{}\" is out of range for type integer",
            literal
        ))
    };

    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v @ Value::Number(n)) => match n.as_i64() {
            Some(i) => i32::try_from(i).map(Some).map_err(|_| out_of_range(n.to_string())),
            None if n.is_u64() => Err(out_of_range(n.to_string())),
            None => Err(invalid_syntax("integer", v)),
        },
        Some(v @ Value::String(s)) => {
            let trimmed = s.trim();
            match trimmed.parse::<i64>() {
                Ok(i) => i32::try_from(i).map(Some).map_err(|_| out_of_range(trimmed.to_string())),
                Err(_) => Err(invalid_syntax("integer", v)),
            }
        }
        Some(v) => Err(invalid_syntax("integer", v)),
    }
}

/// Errors raised by a product store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Error reported by the database driver
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    /// Row rejected by a schema constraint
    #[error("{0}")]
    Constraint(String),

    /// Field value that cannot be stored in its column type
    #[error("{0}")]
    InvalidValue(String),
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Owner-scoped product persistence
///
/// Implementations must apply the `(id, user_id)` scope on every lookup; a
/// product owned by someone else is indistinguishable from a missing one.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Persists a new product owned by `user_id`
    async fn create(&self, user_id: i64, input: ProductInput) -> StoreResult<Product>;

    /// Lists every product owned by `user_id` in store-default order
    async fn list_owned(&self, user_id: i64) -> StoreResult<Vec<Product>>;

    /// Overwrites the supplied fields of an owned product
    ///
    /// Returns `None` when no product matches both `id` and `user_id`.
    async fn update_owned(
        &self,
        id: i64,
        user_id: i64,
        input: ProductInput,
    ) -> StoreResult<Option<Product>>;

    /// Permanently removes an owned product
    ///
    /// Returns `false` when no product matches both `id` and `user_id`.
    async fn delete_owned(&self, id: i64, user_id: i64) -> StoreResult<bool>;

    /// Verifies the store is reachable
    async fn ping(&self) -> StoreResult<()>;
}

/// PostgreSQL-backed product store
#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn create(&self, user_id: i64, input: ProductInput) -> StoreResult<Product> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, description, price, stock, user_id)
            VALUES ($1, $2, $3, COALESCE($4, 0), $5)
            RETURNING id, name, description, price, stock, user_id, created_at, updated_at
            "#,
        )
        .bind(input.name)
        .bind(input.description)
        .bind(input.price)
        .bind(input.stock)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    async fn list_owned(&self, user_id: i64) -> StoreResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, stock, user_id, created_at, updated_at
            FROM products
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn update_owned(
        &self,
        id: i64,
        user_id: i64,
        input: ProductInput,
    ) -> StoreResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                price = COALESCE($3, price),
                stock = COALESCE($4, stock),
                updated_at = NOW()
            WHERE id = $5 AND user_id = $6
            RETURNING id, name, description, price, stock, user_id, created_at, updated_at
            "#,
        )
        .bind(input.name)
        .bind(input.description)
        .bind(input.price)
        .bind(input.stock)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn delete_owned(&self, id: i64, user_id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> StoreResult<()> {
        crate::db::pool::health_check(&self.pool).await?;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i64,
    rows: BTreeMap<i64, Product>,
}

/// In-memory product store
///
/// Mirrors the PostgreSQL schema rules: `name` and `price` are NOT NULL,
/// `stock` defaults to 0, ids are assigned from an increasing sequence and
/// listing follows id order.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    state: RwLock<MemoryState>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn not_null_violation(column: &str) -> StoreError {
        StoreError::Constraint(format!(
            "null value in column \"{}\" of relation \"products\" violates not-null constraint",
            column
        ))
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn create(&self, user_id: i64, input: ProductInput) -> StoreResult<Product> {
        let name = input.name.ok_or_else(|| Self::not_null_violation("name"))?;
        let price = input.price.ok_or_else(|| Self::not_null_violation("price"))?;

        let mut state = self.state.write().await;
        state.last_id += 1;

        let now = Utc::now();
        let product = Product {
            id: state.last_id,
            name,
            description: input.description,
            price,
            stock: input.stock.unwrap_or(0),
            user_id,
            created_at: now,
            updated_at: now,
        };
        state.rows.insert(product.id, product.clone());

        Ok(product)
    }

    async fn list_owned(&self, user_id: i64) -> StoreResult<Vec<Product>> {
        let state = self.state.read().await;
        Ok(state
            .rows
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update_owned(
        &self,
        id: i64,
        user_id: i64,
        input: ProductInput,
    ) -> StoreResult<Option<Product>> {
        let mut state = self.state.write().await;
        let Some(product) = state.rows.get_mut(&id).filter(|p| p.user_id == user_id) else {
            return Ok(None);
        };

        if let Some(name) = input.name {
            product.name = name;
        }
        if let Some(description) = input.description {
            product.description = Some(description);
        }
        if let Some(price) = input.price {
            product.price = price;
        }
        if let Some(stock) = input.stock {
            product.stock = stock;
        }
        product.updated_at = Utc::now();

        Ok(Some(product.clone()))
    }

    async fn delete_owned(&self, id: i64, user_id: i64) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        let owned = state
            .rows
            .get(&id)
            .map(|p| p.user_id == user_id)
            .unwrap_or(false);

        if owned {
            state.rows.remove(&id);
        }
        Ok(owned)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
