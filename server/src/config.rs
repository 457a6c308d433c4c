//! Runtime configuration read from the environment.
//!
//! | Variable       | Default     | Meaning                                   |
//! |----------------|-------------|-------------------------------------------|
//! | `TODO_HOST`    | `127.0.0.1` | IP address to bind                        |
//! | `PORT`         | `3000`      | TCP port to bind                          |
//! | `TODO_DB_PATH` | `todos.db`  | SQLite file, or `:memory:` for no file    |

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use todo_core::SqliteTodoStore;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_PATH: &str = "todos.db";
const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Storage {
    File(PathBuf),
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub storage: Storage,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source. Blank values count
    /// as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host: IpAddr = match var("TODO_HOST") {
            Some(host) => host
                .trim()
                .parse()
                .with_context(|| format!("TODO_HOST must be an IP address, got {host:?}"))?,
            None => DEFAULT_HOST.parse().context("default host")?,
        };

        let port = match var("PORT") {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a number between 0 and 65535, got {port:?}"))?,
            None => DEFAULT_PORT,
        };

        let storage = match var("TODO_DB_PATH") {
            Some(path) if path == IN_MEMORY => Storage::Memory,
            Some(path) => Storage::File(PathBuf::from(path)),
            None => Storage::File(PathBuf::from(DEFAULT_DB_PATH)),
        };

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            storage,
        })
    }

    pub fn open_store(&self) -> Result<SqliteTodoStore> {
        match &self.storage {
            Storage::File(path) => SqliteTodoStore::open(path)
                .with_context(|| format!("opening database {}", path.display())),
            Storage::Memory => {
                SqliteTodoStore::open_in_memory().context("opening in-memory database")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.storage, Storage::File(PathBuf::from("todos.db")));
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("TODO_HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("TODO_DB_PATH", "/var/lib/todo/data.db"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(
            config.storage,
            Storage::File(PathBuf::from("/var/lib/todo/data.db"))
        );
    }

    #[test]
    fn ipv6_host() {
        let config = config(&[("TODO_HOST", "::1"), ("PORT", "9000")]).unwrap();
        assert_eq!(config.bind_addr, "[::1]:9000".parse().unwrap());
    }

    #[test]
    fn memory_storage() {
        let config = config(&[("TODO_DB_PATH", ":memory:")]).unwrap();
        assert_eq!(config.storage, Storage::Memory);
        assert!(config.open_store().is_ok());
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = config(&[("PORT", "  "), ("TODO_DB_PATH", "")]).unwrap();
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.storage, Storage::File(PathBuf::from("todos.db")));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = config(&[("PORT", "http")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));

        assert!(config(&[("PORT", "70000")]).is_err());
    }

    #[test]
    fn invalid_host_is_rejected() {
        let err = config(&[("TODO_HOST", "localhost")]).unwrap_err();
        assert!(err.to_string().contains("TODO_HOST"));
    }
}
