//! JSON Lines output for generated records.

use mock_factory::{Factory, FactoryError, FIRST_IDENTITY};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Default buffer size for JSONL writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Errors that can occur while writing records.
#[derive(Error, Debug)]
pub enum JsonlWriterError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Record generation error.
    #[error("Generator error: {0}")]
    Factory(#[from] FactoryError),
}

/// Metrics from a write operation.
#[derive(Debug, Clone, Default)]
pub struct PopulateMetrics {
    /// Number of records written.
    pub records_written: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Time spent generating records.
    pub generation_duration: Duration,
    /// Time spent serializing and writing records.
    pub write_duration: Duration,
}

impl PopulateMetrics {
    /// Calculate records per second.
    pub fn records_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.records_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Writes records generated by a factory as JSON Lines.
///
/// Identities are allocated sequentially, starting at 1 unless told
/// otherwise. Each record passes through the factory's after-create hook
/// before it is written.
pub struct JsonlWriter {
    factory: Factory,
    next_id: u64,
}

impl JsonlWriter {
    /// Create a writer starting at the first identity.
    pub fn new(factory: Factory) -> Self {
        Self {
            factory,
            next_id: FIRST_IDENTITY,
        }
    }

    /// Set the identity of the next generated record.
    pub fn with_start_id(mut self, id: u64) -> Self {
        self.next_id = id;
        self
    }

    /// Identity the next record will get.
    pub fn current_id(&self) -> u64 {
        self.next_id
    }

    /// Get a reference to the factory.
    pub fn factory(&self) -> &Factory {
        &self.factory
    }

    /// Generate `count` records and write one JSON object per line.
    pub fn write<W: Write>(
        &mut self,
        writer: W,
        count: u64,
    ) -> Result<PopulateMetrics, JsonlWriterError> {
        let start_time = Instant::now();
        let mut metrics = PopulateMetrics::default();
        let mut writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, writer);

        for _ in 0..count {
            let gen_start = Instant::now();
            let record = self.factory.create_record(self.next_id)?;
            let record = self.factory.after_create(record);
            metrics.generation_duration += gen_start.elapsed();

            let write_start = Instant::now();
            serde_json::to_writer(&mut writer, &record)?;
            writeln!(writer)?;
            metrics.write_duration += write_start.elapsed();

            self.next_id += 1;
            metrics.records_written += 1;

            if metrics.records_written % 10000 == 0 {
                debug!("Written {} records", metrics.records_written);
            }
        }

        writer.flush()?;
        metrics.total_duration = start_time.elapsed();
        Ok(metrics)
    }

    /// Generate `count` records into a new file at `output_path`.
    pub fn write_file<P: AsRef<Path>>(
        &mut self,
        output_path: P,
        count: u64,
    ) -> Result<PopulateMetrics, JsonlWriterError> {
        let output_path = output_path.as_ref();
        info!(
            "Generating JSONL file '{}' with {} records starting at id {}",
            output_path.display(),
            count,
            self.next_id
        );

        let file = File::create(output_path)?;
        let metrics = self.write(file, count)?;

        info!(
            "JSONL generation complete: {} records in {:?} ({:.2} records/sec)",
            metrics.records_written,
            metrics.total_duration,
            metrics.records_per_second()
        );
        Ok(metrics)
    }
}
