//! # Store Configuration
//!
//! Where the data files live and how credentials and discounts behave.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MART_DATA_DIR=/srv/mart                                            │
//! │     MART_PASSWORD_SCHEME=sha256                                        │
//! │     MART_ADMIN_PASSWORD=...                                            │
//! │     MART_CARD_DISCOUNT_BPS=1000                                        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/smart-mart/mart.toml (Linux)                             │
//! │     ~/Library/Application Support/com.smartmart.smart-mart/mart.toml   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     ./products.txt, ./admin.txt, ./cashiers.txt, ./bills.txt           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! data_dir = "/srv/mart"
//! password_scheme = "argon2"   # argon2 | sha256
//! default_admin_password = "admin123"
//! card_discount_bps = 1000     # 10%
//!
//! [files]
//! products = "products.txt"
//! admin = "admin.txt"
//! cashiers = "cashiers.txt"
//! bills = "bills.txt"
//! ```

use std::path::{Path, PathBuf};

use mart_core::validation::validate_discount_bps;
use mart_core::DEFAULT_CARD_DISCOUNT_BPS;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::password::PasswordScheme;

/// Password the admin account starts with.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

// =============================================================================
// File Names
// =============================================================================

/// File names of the four documents, relative to `data_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNames {
    #[serde(default = "default_products_file")]
    pub products: String,

    #[serde(default = "default_admin_file")]
    pub admin: String,

    #[serde(default = "default_cashiers_file")]
    pub cashiers: String,

    #[serde(default = "default_bills_file")]
    pub bills: String,
}

fn default_products_file() -> String {
    "products.txt".to_string()
}
fn default_admin_file() -> String {
    "admin.txt".to_string()
}
fn default_cashiers_file() -> String {
    "cashiers.txt".to_string()
}
fn default_bills_file() -> String {
    "bills.txt".to_string()
}

impl Default for FileNames {
    fn default() -> Self {
        FileNames {
            products: default_products_file(),
            admin: default_admin_file(),
            cashiers: default_cashiers_file(),
            bills: default_bills_file(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete store configuration.
///
/// ## Example
/// ```rust
/// use mart_store::{MartConfig, PasswordScheme};
///
/// let config = MartConfig::new("/tmp/mart")
///     .password_scheme(PasswordScheme::Sha256)
///     .card_discount_bps(500);
///
/// assert!(config.products_path().ends_with("products.txt"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MartConfig {
    /// Directory holding the data files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Scheme for newly hashed passwords.
    #[serde(default)]
    pub password_scheme: PasswordScheme,

    /// Password written when the admin record is first created.
    #[serde(default = "default_admin_password")]
    pub default_admin_password: String,

    /// Discount for card payments, in basis points.
    #[serde(default = "default_card_discount")]
    pub card_discount_bps: u32,

    /// Kept last: TOML tables must follow plain keys.
    #[serde(default)]
    pub files: FileNames,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_admin_password() -> String {
    DEFAULT_ADMIN_PASSWORD.to_string()
}
fn default_card_discount() -> u32 {
    DEFAULT_CARD_DISCOUNT_BPS
}

impl Default for MartConfig {
    fn default() -> Self {
        MartConfig {
            data_dir: default_data_dir(),
            files: FileNames::default(),
            password_scheme: PasswordScheme::default(),
            default_admin_password: default_admin_password(),
            card_discount_bps: default_card_discount(),
        }
    }
}

impl MartConfig {
    /// Creates a config with default settings rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        MartConfig {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Sets the scheme for new password hashes.
    pub fn password_scheme(mut self, scheme: PasswordScheme) -> Self {
        self.password_scheme = scheme;
        self
    }

    /// Sets the initial admin password.
    pub fn default_admin_password(mut self, password: impl Into<String>) -> Self {
        self.default_admin_password = password.into();
        self
    }

    /// Sets the card discount in basis points.
    pub fn card_discount_bps(mut self, bps: u32) -> Self {
        self.card_discount_bps = bps;
        self
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`mart.toml`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents =
                    std::fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::Config("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| StoreError::io(&path, e))?;

        info!(?path, "Config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        let files = [
            ("products", &self.files.products),
            ("admin", &self.files.admin),
            ("cashiers", &self.files.cashiers),
            ("bills", &self.files.bills),
        ];
        for (which, name) in files {
            if name.trim().is_empty() {
                return Err(StoreError::Config(format!("{which} file name is empty")));
            }
        }

        if self.default_admin_password.is_empty() {
            return Err(StoreError::Config(
                "default_admin_password must not be empty".into(),
            ));
        }

        validate_discount_bps(self.card_discount_bps)
            .map_err(|e| StoreError::Config(e.to_string()))?;

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) -> StoreResult<()> {
        if let Ok(dir) = std::env::var("MART_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data dir from environment");
            self.data_dir = PathBuf::from(dir);
        }

        if let Ok(scheme) = std::env::var("MART_PASSWORD_SCHEME") {
            self.password_scheme = scheme.parse()?;
        }

        if let Ok(password) = std::env::var("MART_ADMIN_PASSWORD") {
            self.default_admin_password = password;
        }

        if let Ok(bps) = std::env::var("MART_CARD_DISCOUNT_BPS") {
            match bps.parse::<u32>() {
                Ok(b) => self.card_discount_bps = b,
                Err(_) => warn!(value = %bps, "Ignoring non-numeric MART_CARD_DISCOUNT_BPS"),
            }
        }

        Ok(())
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "smartmart", "smart-mart")
            .map(|dirs| dirs.config_dir().join("mart.toml"))
    }

    // =========================================================================
    // Paths
    // =========================================================================

    pub fn products_path(&self) -> PathBuf {
        self.file(&self.files.products)
    }

    pub fn admin_path(&self) -> PathBuf {
        self.file(&self.files.admin)
    }

    pub fn cashiers_path(&self) -> PathBuf {
        self.file(&self.files.cashiers)
    }

    pub fn bills_path(&self) -> PathBuf {
        self.file(&self.files.bills)
    }

    fn file(&self, name: &str) -> PathBuf {
        Path::new(&self.data_dir).join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = MartConfig::default();
        assert_eq!(config.files.products, "products.txt");
        assert_eq!(config.password_scheme, PasswordScheme::Argon2);
        assert_eq!(config.default_admin_password, "admin123");
        assert_eq!(config.card_discount_bps, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = MartConfig::default();

        config.files.bills = " ".to_string();
        assert!(config.validate().is_err());

        config.files.bills = "bills.txt".to_string();
        config.card_discount_bps = 10001;
        assert!(config.validate().is_err());

        config.card_discount_bps = 0;
        config.default_admin_password = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_paths_join_data_dir() {
        let config = MartConfig::new("/srv/mart");
        assert_eq!(config.products_path(), PathBuf::from("/srv/mart/products.txt"));
        assert_eq!(config.admin_path(), PathBuf::from("/srv/mart/admin.txt"));
        assert_eq!(config.cashiers_path(), PathBuf::from("/srv/mart/cashiers.txt"));
        assert_eq!(config.bills_path(), PathBuf::from("/srv/mart/bills.txt"));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: MartConfig = toml::from_str(
            r#"
            data_dir = "/srv/mart"
            password_scheme = "sha256"

            [files]
            bills = "sales.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.password_scheme, PasswordScheme::Sha256);
        assert_eq!(config.files.bills, "sales.json");
        assert_eq!(config.files.products, "products.txt");
        assert_eq!(config.card_discount_bps, 1000);
    }

    #[test]
    fn test_save_and_reload_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("conf/mart.toml");

        let config = MartConfig::new(dir.path())
            .password_scheme(PasswordScheme::Sha256)
            .card_discount_bps(250);
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let reloaded: MartConfig = toml::from_str(&contents).unwrap();
        assert_eq!(reloaded, config);
    }
}
