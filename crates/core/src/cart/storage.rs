//! Snapshot backends for the cart.
//!
//! - **MemoryCartStorage**: keeps the snapshot in process memory (tests, one-shot runs)
//! - **JsonFileCartStorage**: persists the snapshot as a JSON document on disk

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::cart::CartItem;
use crate::errors::ApplicationError;

pub trait CartStorage: Send {
    /// Returns the stored snapshot, or an empty cart when nothing was saved yet.
    fn load(&self) -> Result<Vec<CartItem>, ApplicationError>;

    fn save(&mut self, items: &[CartItem]) -> Result<(), ApplicationError>;

    /// Storage name for logging.
    fn name(&self) -> &str;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryCartStorage {
    snapshot: Vec<CartItem>,
}

impl MemoryCartStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<CartItem>) -> Self {
        Self { snapshot: items }
    }

    pub fn snapshot(&self) -> &[CartItem] {
        &self.snapshot
    }
}

impl CartStorage for MemoryCartStorage {
    fn load(&self) -> Result<Vec<CartItem>, ApplicationError> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, items: &[CartItem]) -> Result<(), ApplicationError> {
        self.snapshot = items.to_vec();
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[derive(Clone, Debug)]
pub struct JsonFileCartStorage {
    path: PathBuf,
}

impl JsonFileCartStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStorage for JsonFileCartStorage {
    fn load(&self) -> Result<Vec<CartItem>, ApplicationError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no cart snapshot yet");
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path).map_err(|error| {
            ApplicationError::Persistence(format!(
                "failed to read cart snapshot `{}`: {error}",
                self.path.display()
            ))
        })?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&raw).map_err(|error| {
            ApplicationError::Persistence(format!(
                "corrupt cart snapshot `{}`: {error}",
                self.path.display()
            ))
        })
    }

    fn save(&mut self, items: &[CartItem]) -> Result<(), ApplicationError> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|error| {
                ApplicationError::Persistence(format!(
                    "failed to create `{}`: {error}",
                    parent.display()
                ))
            })?;
        }

        let payload = serde_json::to_string_pretty(items).map_err(|error| {
            ApplicationError::Persistence(format!("failed to encode cart snapshot: {error}"))
        })?;

        // The snapshot is only ever replaced whole.
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, payload)
            .and_then(|()| fs::rename(&staging, &self.path))
            .map_err(|error| {
                ApplicationError::Persistence(format!(
                    "failed to write cart snapshot `{}`: {error}",
                    self.path.display()
                ))
            })
    }

    fn name(&self) -> &str {
        "json-file"
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    use super::{CartStorage, JsonFileCartStorage};
    use crate::domain::cart::{CartItem, CartItemId, CartOption};
    use crate::domain::service::ServiceId;
    use crate::errors::ApplicationError;

    fn item() -> CartItem {
        CartItem {
            id: CartItemId("line-1".to_owned()),
            service_id: ServiceId("salon-women".to_owned()),
            name: "Salon for Women - Facial".to_owned(),
            price: Decimal::new(129_950, 2),
            quantity: 2,
            image: None,
            options: vec![CartOption {
                name: "Type".to_owned(),
                value: "Gold Facial".to_owned(),
                price: Some(Decimal::from(500)),
            }],
        }
    }

    #[test]
    fn missing_file_loads_as_empty_cart() {
        let temp_dir = TempDir::new().expect("temp dir");
        let storage = JsonFileCartStorage::new(temp_dir.path().join("cart.json"));

        assert_eq!(storage.load(), Ok(Vec::new()));
    }

    #[test]
    fn saved_snapshot_is_read_back() {
        let temp_dir = TempDir::new().expect("temp dir");
        let mut storage = JsonFileCartStorage::new(temp_dir.path().join("nested/cart.json"));

        storage.save(&[item()]).expect("save");

        assert_eq!(storage.load().expect("load"), vec![item()]);
        assert!(!temp_dir.path().join("nested/cart.json.tmp").exists());
    }

    #[test]
    fn corrupt_snapshot_is_a_persistence_error() {
        let temp_dir = TempDir::new().expect("temp dir");
        let path = temp_dir.path().join("cart.json");
        std::fs::write(&path, "{not json").expect("write");

        let error = JsonFileCartStorage::new(&path).load().expect_err("corrupt");

        assert!(matches!(error, ApplicationError::Persistence(message) if message.contains("corrupt")));
    }
}
