// WHY: St. Gallen ordinals end in a declined suffix; the suffixes are external data
// loaded once at startup and only read afterwards

use anyhow::{Context, Result};
use futures::StreamExt;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use crate::span::{Case, Declension, DeclensionClass, Gender};

/// One `;`-separated row: `declension;gender;case;suffix`
#[derive(Debug, Deserialize)]
struct DeclensionRow {
    declension: DeclensionClass,
    gender: Gender,
    case: Case,
    #[serde(default)]
    suffix: String,
}

/// Mapping from (class, gender, case) to the ordinal ending
#[derive(Debug, Clone, Default)]
pub struct OrdinalDeclensionTable {
    suffixes: HashMap<Declension, String>,
}

impl OrdinalDeclensionTable {
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Declension, S)>,
        S: Into<String>,
    {
        Self {
            suffixes: entries
                .into_iter()
                .map(|(key, suffix)| (key, suffix.into()))
                .collect(),
        }
    }

    /// Load the table from a `;`-separated file with a header row
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Failed to open declension table {}", path.display()))?;

        let mut reader = csv_async::AsyncReaderBuilder::new()
            .delimiter(b';')
            .create_deserializer(file);
        let mut rows = reader.deserialize::<DeclensionRow>();

        let mut suffixes = HashMap::new();
        let mut line = 1usize;
        while let Some(row) = rows.next().await {
            line += 1;
            let row = row.with_context(|| {
                format!("Malformed declension row {} in {}", line, path.display())
            })?;
            let key = Declension {
                class: row.declension,
                gender: row.gender,
                case: row.case,
            };
            suffixes.insert(key, row.suffix.trim().to_string());
        }

        info!("Loaded {} ordinal declension rows from {}", suffixes.len(), path.display());
        Ok(Self { suffixes })
    }

    pub fn lookup(&self, key: &Declension) -> Option<&str> {
        self.suffixes.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.suffixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_table_from_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("declension.csv");
        std::fs::write(
            &path,
            "declension;gender;case;suffix\nweak;masc;nom;i\nweak;fem;dat;e\nstrong;plural;gen;er\n",
        )
        .expect("Failed to write table");

        let table = OrdinalDeclensionTable::load(&path).await.unwrap();
        assert_eq!(table.len(), 3);

        let key = Declension {
            class: DeclensionClass::Weak,
            gender: Gender::Feminine,
            case: Case::Dative,
        };
        assert_eq!(table.lookup(&key), Some("e"));

        let missing = Declension {
            class: DeclensionClass::Mixed,
            gender: Gender::Neuter,
            case: Case::Accusative,
        };
        assert_eq!(table.lookup(&missing), None);
    }

    #[tokio::test]
    async fn test_malformed_row_is_an_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("declension.csv");
        std::fs::write(&path, "declension;gender;case;suffix\nsoft;masc;nom;i\n")
            .expect("Failed to write table");

        assert!(OrdinalDeclensionTable::load(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let result = OrdinalDeclensionTable::load(temp_dir.path().join("absent.csv")).await;
        assert!(result.is_err());
    }
}
