// WHY: Known place names decide whether a bare 4-digit token is a postal code;
// the list is loaded once and never mutated

use anyhow::{Context, Result};
use futures::StreamExt;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Column holding the locality name in the Swiss PLZ/Ortschaften export
pub const PLACE_COLUMN: &str = "Ortschaftsname";

/// Set of lower-cased place names
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    places: HashSet<String>,
}

impl Gazetteer {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            places: names
                .into_iter()
                .map(|name| normalize_place(name.as_ref()))
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }

    /// Load a `;`-separated locality export. Uses the `Ortschaftsname` column when
    /// present, otherwise the first column.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Failed to open gazetteer {}", path.display()))?;

        let mut reader = csv_async::AsyncReaderBuilder::new()
            .delimiter(b';')
            .flexible(true)
            .create_reader(file);

        let headers = reader
            .headers()
            .await
            .with_context(|| format!("Failed to read gazetteer header in {}", path.display()))?;
        let column = headers
            .iter()
            .position(|header| header.trim() == PLACE_COLUMN)
            .unwrap_or(0);

        let mut places = HashSet::new();
        let mut records = reader.records();
        while let Some(record) = records.next().await {
            let record = record
                .with_context(|| format!("Malformed gazetteer record in {}", path.display()))?;
            if let Some(name) = record.get(column) {
                let name = normalize_place(name);
                if !name.is_empty() {
                    places.insert(name);
                }
            }
        }

        info!("Loaded {} place names from {}", places.len(), path.display());
        Ok(Self { places })
    }

    /// Case-insensitive membership test
    pub fn contains(&self, candidate: &str) -> bool {
        self.places.contains(&normalize_place(candidate))
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

fn normalize_place(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
