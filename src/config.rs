//! Command-line configuration for the server and client binaries.

use std::net::SocketAddr;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Cart storage backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Process-local cart over the demo catalog
    Memory,
    /// `cart` and `products` tables in SQLite or PostgreSQL
    Sql,
}

/// Shopping cart RPC server
#[derive(Parser, Debug)]
#[command(name = "shop_cart")]
#[command(version)]
pub struct ServeArgs {
    /// Bind address
    #[arg(long, default_value = "0.0.0.0", env = "SHOP_CART_HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 2368, env = "SHOP_CART_PORT")]
    pub port: u16,

    /// Storage backend to use
    #[arg(short, long, value_enum, default_value_t = Backend::Memory, env = "SHOP_CART_BACKEND")]
    pub backend: Backend,

    /// Database URL for the sql backend (sqlite:... or postgres://...)
    #[arg(
        long,
        default_value = "sqlite:shop_cart.db?mode=rwc",
        env = "SHOP_CART_DATABASE_URL"
    )]
    pub database_url: String,

    /// Drop the cart tables on shutdown
    #[arg(long, env = "SHOP_CART_CLEAN")]
    pub clean: bool,
}

impl ServeArgs {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("invalid bind address {addr}: {e}"))
    }
}

/// Shopping cart demo client
#[derive(Parser, Debug)]
#[command(name = "cart_client")]
pub struct ClientArgs {
    /// Server base URL
    #[arg(long, default_value = "http://127.0.0.1:2368", env = "SHOP_CART_ADDR")]
    pub addr: String,

    /// Product to add
    #[arg(long, default_value_t = 42)]
    pub product_id: u64,

    /// Quantity to add
    #[arg(long, default_value_t = 5)]
    pub quantity: i32,
}

/// Installs the fmt subscriber; `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_defaults() {
        let args = ServeArgs::parse_from(["shop_cart"]);
        assert_eq!(args.port, 2368);
        assert_eq!(args.backend, Backend::Memory);
        assert!(!args.clean);
        assert_eq!(args.socket_addr().unwrap().port(), 2368);
    }

    #[test]
    fn serve_sql_backend() {
        let args = ServeArgs::parse_from([
            "shop_cart",
            "--backend",
            "sql",
            "--database-url",
            "sqlite::memory:",
            "--host",
            "127.0.0.1",
            "-p",
            "9000",
        ]);
        assert_eq!(args.backend, Backend::Sql);
        assert_eq!(args.database_url, "sqlite::memory:");
        assert_eq!(args.socket_addr().unwrap().to_string(), "127.0.0.1:9000");
    }
}
