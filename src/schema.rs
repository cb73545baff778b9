//! Startup table creation, one entry point per service.
//!
//! Each service owns its own table; the order service reads `users` and
//! `products` from the shared database without creating them.

use anyhow::{Context, Result};
use sqlx::PgPool;

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id            UUID PRIMARY KEY,
    name          VARCHAR(255) NOT NULL,
    email         VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    created_at    TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at    TIMESTAMPTZ NOT NULL DEFAULT now(),
    deleted_at    TIMESTAMPTZ
)
"#;

const CREATE_USERS_DELETED_IDX: &str =
    "CREATE INDEX IF NOT EXISTS idx_users_deleted_at ON users (deleted_at)";

const CREATE_PRODUCTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id          UUID PRIMARY KEY,
    name        VARCHAR(255) NOT NULL,
    description VARCHAR(1000) NOT NULL,
    price       NUMERIC NOT NULL,
    stock       INTEGER NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
    deleted_at  TIMESTAMPTZ
)
"#;

const CREATE_PRODUCTS_DELETED_IDX: &str =
    "CREATE INDEX IF NOT EXISTS idx_products_deleted_at ON products (deleted_at)";

const CREATE_ORDERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS orders (
    id          UUID PRIMARY KEY,
    user_id     UUID NOT NULL,
    product_id  UUID NOT NULL,
    quantity    INTEGER NOT NULL,
    total_price NUMERIC NOT NULL,
    status      VARCHAR(64) NOT NULL DEFAULT 'pending',
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
    deleted_at  TIMESTAMPTZ
)
"#;

const CREATE_ORDERS_DELETED_IDX: &str =
    "CREATE INDEX IF NOT EXISTS idx_orders_deleted_at ON orders (deleted_at)";

pub async fn init_user_schema(pool: &PgPool) -> Result<()> {
    tracing::info!("Ensuring users table exists");
    exec_all(pool, &[CREATE_USERS_TABLE, CREATE_USERS_DELETED_IDX]).await
}

pub async fn init_product_schema(pool: &PgPool) -> Result<()> {
    tracing::info!("Ensuring products table exists");
    exec_all(pool, &[CREATE_PRODUCTS_TABLE, CREATE_PRODUCTS_DELETED_IDX]).await
}

pub async fn init_order_schema(pool: &PgPool) -> Result<()> {
    tracing::info!("Ensuring orders table exists");
    exec_all(pool, &[CREATE_ORDERS_TABLE, CREATE_ORDERS_DELETED_IDX]).await
}

async fn exec_all(pool: &PgPool, statements: &[&str]) -> Result<()> {
    for stmt in statements {
        sqlx::query(stmt)
            .execute(pool)
            .await
            .with_context(|| "Failed to run schema statement")?;
    }
    Ok(())
}
