// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tempfile::TempDir;
use zahlwort::{Dialect, Normalizer, NormalizerConfig, Resources};

/// Shipped sample data, relative to the crate root
pub fn data_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

pub fn config_for(dialect: Dialect) -> NormalizerConfig {
    NormalizerConfig {
        dialect,
        gazetteer_path: data_path("plz_ortschaften.csv"),
        declension_path: data_path("ordinal_declension.csv"),
        ..NormalizerConfig::default()
    }
}

/// Load resources on a private runtime so fixtures work from sync and async tests alike
fn load_resources(dialect: Dialect) -> Arc<Resources> {
    let config = config_for(dialect);
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to build runtime");
        runtime
            .block_on(Resources::load(&config))
            .expect("Failed to load sample data")
    })
    .join()
    .map(Arc::new)
    .expect("Resource loading thread panicked")
}

// WHY: Pattern compilation and CSV loading happen once per test binary
static BASEL: OnceLock<Normalizer> = OnceLock::new();
static ST_GALLEN: OnceLock<Normalizer> = OnceLock::new();

pub fn basel() -> &'static Normalizer {
    BASEL.get_or_init(|| {
        Normalizer::new(Dialect::Basel, load_resources(Dialect::Basel))
            .expect("Failed to build Basel normalizer")
    })
}

pub fn st_gallen() -> &'static Normalizer {
    ST_GALLEN.get_or_init(|| {
        Normalizer::new(Dialect::StGallen, load_resources(Dialect::StGallen))
            .expect("Failed to build St. Gallen normalizer")
    })
}

/// Test fixture helper for creating temporary directories with input texts
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            root_path,
        }
    }

    /// Create a text file (and its parent directories) with given content
    pub fn create_text_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    pub fn read_spoken<P: AsRef<Path>>(&self, source_path: P) -> Result<String, std::io::Error> {
        fs::read_to_string(zahlwort::output_path(source_path.as_ref()))
    }

    pub fn spoken_exists<P: AsRef<Path>>(&self, source_path: P) -> bool {
        zahlwort::output_path(source_path.as_ref()).exists()
    }
}
