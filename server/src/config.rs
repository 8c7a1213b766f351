//! Command-line and environment configuration for the server binary.

use clap::Parser;

use crate::error::StoreResult;
use crate::store::TodoStore;

/// Database value that selects a private in-memory store.
pub const MEMORY_DATABASE: &str = ":memory:";

#[derive(Parser, Debug, Clone)]
#[command(name = "todo-server", version, about = "Todo list RPC server backed by SQLite")]
pub struct Config {
    /// Interface to bind.
    #[arg(long, env = "TODO_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// SQLite database path, or `:memory:` for a throwaway store.
    #[arg(long, env = "TODO_DATABASE", default_value = "todos.sqlite3")]
    pub database: String,

    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
    #[arg(long, env = "TODO_LOG", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn open_store(&self) -> StoreResult<TodoStore> {
        if self.database == MEMORY_DATABASE {
            TodoStore::open_in_memory()
        } else {
            TodoStore::open(&self.database)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flags_override_defaults() {
        let config = Config::try_parse_from([
            "todo-server",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--database",
            MEMORY_DATABASE,
        ])
        .unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.database, ":memory:");
    }

    #[test]
    fn memory_database_opens_empty_store() {
        let config = Config::try_parse_from(["todo-server", "--database", MEMORY_DATABASE]).unwrap();
        let store = config.open_store().unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn rejects_non_numeric_port() {
        assert!(Config::try_parse_from(["todo-server", "--port", "http"]).is_err());
    }
}
