//! Shared configuration helpers for the air-quality map crates.

/// Key-value credential storage.
pub mod tokens {
    use anyhow::Context;
    use log::debug;
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    /// Store key for the AQI provider credential.
    pub const AQI_TOKEN_KEY: &str = "waqi_token";

    /// Default location of the store, relative to the working directory.
    pub const DEFAULT_STORE_PATH: &str = ".aqi-map/tokens.json";

    /// A flat JSON object of string keys to string values, kept on disk.
    #[derive(Debug, Clone, PartialEq)]
    pub struct TokenStore {
        path: PathBuf,
        values: BTreeMap<String, String>,
    }

    impl TokenStore {
        /// Load the store at `path`. A missing file is an empty store.
        pub fn load(path: impl AsRef<Path>) -> anyhow::Result<TokenStore> {
            let path = path.as_ref().to_path_buf();
            let values = if path.exists() {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading token store {}", path.display()))?;
                if text.trim().is_empty() {
                    BTreeMap::new()
                } else {
                    serde_json::from_str(&text)
                        .with_context(|| format!("parsing token store {}", path.display()))?
                }
            } else {
                debug!("No token store at {}, starting empty", path.display());
                BTreeMap::new()
            };
            Ok(TokenStore { path, values })
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        pub fn get(&self, key: &str) -> Option<&str> {
            self.values.get(key).map(String::as_str)
        }

        pub fn set(&mut self, key: &str, value: &str) {
            self.values.insert(key.to_string(), value.to_string());
        }

        pub fn remove(&mut self, key: &str) -> Option<String> {
            self.values.remove(key)
        }

        /// Write the store back to disk, creating parent directories.
        pub fn save(&self) -> anyhow::Result<()> {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let text = serde_json::to_string_pretty(&self.values)?;
            std::fs::write(&self.path, text)
                .with_context(|| format!("writing token store {}", self.path.display()))?;
            Ok(())
        }
    }

    /// An explicit value (flag or environment) wins over the stored one.
    /// Blank values count as absent.
    pub fn resolve_token(explicit: Option<&str>, store: &TokenStore) -> Option<String> {
        explicit
            .filter(|t| !t.trim().is_empty())
            .or_else(|| store.get(AQI_TOKEN_KEY).filter(|t| !t.trim().is_empty()))
            .map(|t| t.trim().to_string())
    }

    /// `abcd…wxyz` style rendering for display.
    pub fn mask(token: &str) -> String {
        let chars: Vec<char> = token.chars().collect();
        if chars.len() <= 8 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}…{}", head, tail)
    }

}
