//! SQL-backed store variants.
//!
//! Uses sqlx's `AnyPool`, so the same stores run against SQLite or
//! PostgreSQL. Mutations are single upsert/delete statements; there is no
//! in-process lock, consistency is left to the database.

use async_trait::async_trait;
use sqlx::any::AnyPoolOptions;
use sqlx::{AnyPool, Executor};

use super::models::{Item, Product};
use super::store::{CartStore, ProductReader};
use crate::error::CartError;

/// Demo catalog seeded by [`migrate`].
pub fn demo_products() -> Vec<Product> {
    vec![
        Product::new(24, "Banana", 2.49),
        Product::new(42, "Apple", 4.99),
        Product::new(420, "Bottle of Soda", 10.0),
    ]
}

const CREATE_TABLES: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS products (
        id BIGINT PRIMARY KEY,
        name TEXT NOT NULL,
        price DOUBLE PRECISION NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS cart (
        product_id BIGINT PRIMARY KEY,
        quantity BIGINT NOT NULL
    )",
];

/// Connects to the database at `url` (e.g. `sqlite:shop_cart.db?mode=rwc`
/// or `postgres://...`).
pub async fn connect(url: &str) -> Result<AnyPool, CartError> {
    sqlx::any::install_default_drivers();
    let mut options = AnyPoolOptions::new().max_connections(5);
    if url.starts_with("sqlite:") {
        // Concurrent writers wait for the file lock instead of failing.
        options = options.after_connect(|conn, _meta| {
            Box::pin(async move {
                conn.execute("PRAGMA busy_timeout = 5000").await?;
                Ok(())
            })
        });
    }
    let pool = options.connect(url).await?;
    Ok(pool)
}

/// Opens a private in-memory SQLite database.
///
/// All pooled connections share one database through the shared cache, and a
/// connection is kept open so the data outlives idle periods.
pub async fn sqlite_in_memory() -> Result<AnyPool, CartError> {
    sqlx::any::install_default_drivers();
    let url = format!(
        "sqlite:file:cart_{}?mode=memory&cache=shared",
        uuid::Uuid::new_v4().simple()
    );
    let pool = AnyPoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(&url)
        .await?;
    Ok(pool)
}

/// Creates the `products` and `cart` tables and seeds the demo catalog.
pub async fn migrate(pool: &AnyPool) -> Result<(), CartError> {
    for statement in CREATE_TABLES {
        sqlx::query(statement).execute(pool).await?;
    }

    for product in demo_products() {
        sqlx::query(
            "INSERT INTO products (id, name, price) VALUES ($1, $2, $3)
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(to_key(product.id)?)
        .bind(product.name.as_str())
        .bind(product.price)
        .execute(pool)
        .await?;
    }

    tracing::info!("cart schema ready");
    Ok(())
}

/// Drops the tables created by [`migrate`].
pub async fn clean(pool: &AnyPool) -> Result<(), CartError> {
    sqlx::query("DROP TABLE IF EXISTS cart").execute(pool).await?;
    sqlx::query("DROP TABLE IF EXISTS products")
        .execute(pool)
        .await?;
    tracing::info!("cart schema dropped");
    Ok(())
}

/// Ids are stored as signed BIGINT; anything beyond that range cannot exist.
fn to_key(id: u64) -> Result<i64, CartError> {
    i64::try_from(id).map_err(|_| CartError::InvalidProduct)
}

/// Rows outside the `Item` range are reported as decode failures.
fn to_item((product_id, quantity): (i64, i64)) -> Result<Item, CartError> {
    let decode = |e: std::num::TryFromIntError| CartError::Storage(sqlx::Error::Decode(Box::new(e)));
    Ok(Item {
        product_id: u64::try_from(product_id).map_err(decode)?,
        quantity: i32::try_from(quantity).map_err(decode)?,
    })
}

// =============================================================================
// Cart Store
// =============================================================================

#[derive(Debug, Clone)]
pub struct SqlCartStore {
    pool: AnyPool,
}

impl SqlCartStore {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartStore for SqlCartStore {
    async fn add(&self, item: Item) -> Result<(), CartError> {
        item.validate()?;
        // The guard leaves the row untouched when the sum would leave i32.
        let merged = sqlx::query(
            "INSERT INTO cart (product_id, quantity) VALUES ($1, $2)
             ON CONFLICT (product_id) DO UPDATE SET quantity = cart.quantity + excluded.quantity
             WHERE cart.quantity + excluded.quantity <= $3",
        )
        .bind(to_key(item.product_id)?)
        .bind(i64::from(item.quantity))
        .bind(i64::from(i32::MAX))
        .execute(&self.pool)
        .await?
        .rows_affected();
        if merged == 0 {
            return Err(CartError::InvalidQuantity);
        }
        Ok(())
    }

    async fn get_by_id(&self, product_id: u64) -> Result<Option<Item>, CartError> {
        if product_id == 0 {
            return Ok(None);
        }
        let Ok(key) = i64::try_from(product_id) else {
            return Ok(None);
        };
        let row: Option<(i64, i64)> =
            sqlx::query_as("SELECT product_id, quantity FROM cart WHERE product_id = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        row.map(to_item).transpose()
    }

    async fn get_list(&self) -> Result<(usize, Vec<Item>), CartError> {
        let rows: Vec<(i64, i64)> =
            sqlx::query_as("SELECT product_id, quantity FROM cart ORDER BY product_id ASC")
                .fetch_all(&self.pool)
                .await?;
        let items = rows
            .into_iter()
            .map(to_item)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((items.len(), items))
    }

    async fn update(&self, item: Item) -> Result<(), CartError> {
        if item.quantity <= 0 {
            if item.product_id != 0 {
                let deleted = sqlx::query("DELETE FROM cart WHERE product_id = $1")
                    .bind(to_key(item.product_id)?)
                    .execute(&self.pool)
                    .await?
                    .rows_affected();
                if deleted > 0 {
                    return Ok(());
                }
            }
            // Nothing to delete: the request is an add and fails like one.
            return item.validate();
        }

        item.validate()?;
        sqlx::query(
            "INSERT INTO cart (product_id, quantity) VALUES ($1, $2)
             ON CONFLICT (product_id) DO UPDATE SET quantity = excluded.quantity",
        )
        .bind(to_key(item.product_id)?)
        .bind(i64::from(item.quantity))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, product_id: u64) -> Result<(), CartError> {
        let Ok(key) = i64::try_from(product_id) else {
            return Err(CartError::NotFound);
        };
        let deleted = sqlx::query("DELETE FROM cart WHERE product_id = $1")
            .bind(key)
            .execute(&self.pool)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Err(CartError::NotFound);
        }
        Ok(())
    }
}

// =============================================================================
// Product Catalog
// =============================================================================

#[derive(Debug, Clone)]
pub struct SqlProductStore {
    pool: AnyPool,
}

impl SqlProductStore {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductReader for SqlProductStore {
    async fn get_by_id(&self, id: u64) -> Result<Option<Product>, CartError> {
        let Ok(key) = i64::try_from(id) else {
            return Ok(None);
        };
        let row: Option<(i64, String, f64)> =
            sqlx::query_as("SELECT id, name, price FROM products WHERE id = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(id, name, price)| Product::new(id as u64, name, price)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::future::join_all;
    use std::sync::Arc;

    async fn setup() -> AnyPool {
        let pool = sqlite_in_memory().await.unwrap();
        migrate(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn migrate_is_idempotent() {
        let pool = setup().await;
        migrate(&pool).await.unwrap();

        let catalog = SqlProductStore::new(pool);
        let soda = catalog.get_by_id(420).await.unwrap().unwrap();
        assert_eq!(soda.name, "Bottle of Soda");
        assert_eq!(soda.price, 10.0);
        assert!(catalog.get_by_id(7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn add_merges_and_lists_in_order() {
        let store = SqlCartStore::new(setup().await);

        store.add(Item::new(42, 24)).await.unwrap();
        store.add(Item::new(24, 42)).await.unwrap();
        store.add(Item::new(42, 1)).await.unwrap();

        let (count, items) = store.get_list().await.unwrap();
        assert_eq!(count, 2);
        assert_eq!(items, vec![Item::new(24, 42), Item::new(42, 25)]);
    }

    #[tokio::test]
    async fn add_rejects_invalid_input() {
        let store = SqlCartStore::new(setup().await);
        assert!(matches!(
            store.add(Item::new(0, 1)).await,
            Err(CartError::InvalidProduct)
        ));
        assert!(matches!(
            store.add(Item::new(42, 0)).await,
            Err(CartError::InvalidQuantity)
        ));
        assert_eq!(store.get_list().await.unwrap().0, 0);
    }

    #[tokio::test]
    async fn update_overwrites_creates_and_deletes() {
        let store = SqlCartStore::new(setup().await);

        store.update(Item::new(42, 5)).await.unwrap();
        assert_eq!(store.get_by_id(42).await.unwrap(), Some(Item::new(42, 5)));

        store.update(Item::new(42, 3)).await.unwrap();
        assert_eq!(store.get_by_id(42).await.unwrap(), Some(Item::new(42, 3)));

        store.update(Item::new(42, 0)).await.unwrap();
        assert_eq!(store.get_by_id(42).await.unwrap(), None);

        assert!(matches!(
            store.update(Item::new(42, -1)).await,
            Err(CartError::InvalidQuantity)
        ));
        assert!(matches!(
            store.update(Item::new(0, -1)).await,
            Err(CartError::InvalidProduct)
        ));
    }

    #[tokio::test]
    async fn delete_reports_missing_items() {
        let store = SqlCartStore::new(setup().await);
        store.add(Item::new(24, 2)).await.unwrap();

        assert!(matches!(store.delete(42).await, Err(CartError::NotFound)));
        store.delete(24).await.unwrap();
        assert!(matches!(store.delete(24).await, Err(CartError::NotFound)));
        assert_eq!(store.get_list().await.unwrap(), (0, vec![]));
    }

    #[tokio::test]
    async fn add_rejects_merge_overflow() {
        let store = SqlCartStore::new(setup().await);
        store.add(Item::new(42, i32::MAX)).await.unwrap();

        assert!(matches!(
            store.add(Item::new(42, 10)).await,
            Err(CartError::InvalidQuantity)
        ));
        assert_eq!(
            store.get_by_id(42).await.unwrap(),
            Some(Item::new(42, i32::MAX))
        );

        store.add(Item::new(24, i32::MAX - 1)).await.unwrap();
        store.add(Item::new(24, 1)).await.unwrap();
        assert!(matches!(
            store.add(Item::new(24, 1)).await,
            Err(CartError::InvalidQuantity)
        ));
        let (count, items) = store.get_list().await.unwrap();
        assert_eq!(count, 2);
        assert_eq!(
            items,
            vec![Item::new(24, i32::MAX), Item::new(42, i32::MAX)]
        );
    }

    #[tokio::test]
    async fn out_of_range_rows_are_errors() {
        let pool = setup().await;
        sqlx::query("INSERT INTO cart (product_id, quantity) VALUES ($1, $2)")
            .bind(7_i64)
            .bind(i64::from(i32::MAX) + 10)
            .execute(&pool)
            .await
            .unwrap();

        let store = SqlCartStore::new(pool);
        assert!(matches!(
            store.get_by_id(7).await,
            Err(CartError::Storage(_))
        ));
        assert!(matches!(store.get_list().await, Err(CartError::Storage(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_adds_do_not_lose_updates() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}?mode=rwc", dir.path().join("cart.db").display());
        let pool = connect(&url).await.unwrap();
        migrate(&pool).await.unwrap();
        let store = Arc::new(SqlCartStore::new(pool));

        let tasks = (0..200).map(|n| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.add(Item::new(n % 5 + 1, 1)).await })
        });
        for res in join_all(tasks).await {
            res.unwrap().unwrap();
        }

        let (count, items) = store.get_list().await.unwrap();
        assert_eq!(count, 5);
        assert_eq!(
            items.iter().map(|i| i.product_id).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );
        assert!(items.iter().all(|i| i.quantity == 40));
    }

    #[tokio::test]
    async fn clean_drops_tables() {
        let pool = setup().await;
        clean(&pool).await.unwrap();

        let store = SqlCartStore::new(pool);
        assert!(matches!(
            store.get_list().await,
            Err(CartError::Storage(_))
        ));
    }
}
