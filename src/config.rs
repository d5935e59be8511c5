use std::{env, net::SocketAddr, path::PathBuf};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/progress.json";
const DEFAULT_CATALOG_PATH: &str = "data/catalog.json";

/// Runtime settings, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Storage area file holding the progress blob.
    pub data_path: PathBuf,
    /// Catalog document with guards and athletes.
    pub catalog_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let data_path = lookup("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
        let catalog_path = lookup("APP_CATALOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH));

        Self {
            port,
            data_path,
            catalog_path,
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_path, PathBuf::from("data/progress.json"));
        assert_eq!(config.catalog_path, PathBuf::from("data/catalog.json"));
    }

    #[test]
    fn environment_overrides_defaults() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("PORT", "9001"),
            ("APP_DATA_PATH", "/tmp/progress.json"),
            ("APP_CATALOG_PATH", "/srv/catalog.json"),
        ]);
        let config = AppConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.bind_addr().port(), 9001);
        assert_eq!(config.data_path, PathBuf::from("/tmp/progress.json"));
        assert_eq!(config.catalog_path, PathBuf::from("/srv/catalog.json"));
    }

    #[test]
    fn invalid_port_falls_back() {
        let config = AppConfig::from_lookup(|key| (key == "PORT").then(|| "http".to_string()));
        assert_eq!(config.port, 8080);
    }
}
