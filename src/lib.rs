pub mod config;
pub mod detector;
pub mod error;
pub mod gazetteer;
pub mod generator;
pub mod lexicon;
pub mod pipeline;
pub mod processing;
pub mod resolver;
pub mod rewriter;
pub mod span;
pub mod temporal;
pub mod validator;

// Re-export main types for convenient access
pub use config::{NormalizerConfig, TemporalBackend};
pub use error::{GenerateError, TaggerError};
pub use lexicon::Dialect;
pub use pipeline::{Normalized, Normalizer, Resources, SpanFailure};
pub use rewriter::Replacement;
pub use span::{NumberKind, NumberSpan};

// Re-export file processing for the CLI and benchmarks
pub use processing::{
    discover_inputs, output_path, process_file, process_files_parallel, FileStats,
    ProcessingConfig, RunStats,
};
