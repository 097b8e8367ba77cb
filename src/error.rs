//! Error handling for the Landau looper
//!
//! Every failure the library can surface is a variant of [`LandauError`].
//! Domain errors carry the values needed to explain them to a user.

use thiserror::Error;

/// Result type alias for Landau operations
pub type Result<T> = std::result::Result<T, LandauError>;

/// Main error type for Landau operations
#[derive(Error, Debug)]
pub enum LandauError {
    // Partition Errors
    #[error("Partition {partition:?} sums to {sum}, not {n}")]
    PartitionMismatch {
        partition: Vec<u32>,
        sum: u64,
        n: u32,
    },

    #[error("Partition {partition:?} contains a zero-length part")]
    ZeroPart { partition: Vec<u32> },

    #[error("LCM of partition {partition:?} does not fit in 64 bits")]
    LcmOverflow { partition: Vec<u32> },

    #[error("Automatic search for n={n} exceeds the brute-force limit of {limit}")]
    SearchTooLarge { n: u32, limit: u32 },

    // Invariant Errors
    #[error("Loop count is not integral: g(n)={g_n} is not divisible by part {part_secs}s")]
    NonIntegralLoopCount { g_n: u64, part_secs: u32 },

    // Audio Errors
    #[error("Output of {g_n}s at {sample_rate} Hz is too large to allocate")]
    OutputTooLarge { g_n: u64, sample_rate: u32 },

    #[error("Buffer of {num_channels} x {num_samples} samples is too large to allocate")]
    BufferTooLarge {
        num_samples: usize,
        num_channels: usize,
    },

    #[error("Invalid sample rate: {sample_rate} Hz")]
    InvalidSampleRate { sample_rate: u32 },

    #[error("Invalid audio: {reason}")]
    InvalidAudio {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Audio contains no samples")]
    EmptyAudio,

    // File Errors
    #[error("File not found: {path}")]
    FileNotFound {
        path: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LandauError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            LandauError::PartitionMismatch { .. } => "PARTITION_MISMATCH",
            LandauError::ZeroPart { .. } => "ZERO_PART",
            LandauError::LcmOverflow { .. } => "LCM_OVERFLOW",
            LandauError::SearchTooLarge { .. } => "SEARCH_TOO_LARGE",
            LandauError::NonIntegralLoopCount { .. } => "NON_INTEGRAL_LOOP_COUNT",
            LandauError::OutputTooLarge { .. } => "OUTPUT_TOO_LARGE",
            LandauError::BufferTooLarge { .. } => "BUFFER_TOO_LARGE",
            LandauError::InvalidSampleRate { .. } => "INVALID_SAMPLE_RATE",
            LandauError::InvalidAudio { .. } => "INVALID_AUDIO",
            LandauError::EmptyAudio => "EMPTY_AUDIO",
            LandauError::FileNotFound { .. } => "FILE_NOT_FOUND",
            LandauError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            LandauError::Io(_) => "IO_ERROR",
            LandauError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this error is recoverable
    ///
    /// Invariant violations are never recoverable: they mean the mixer was
    /// handed a loop length that does not divide the output duration.
    pub fn is_recoverable(&self) -> bool {
        match self {
            LandauError::PartitionMismatch { .. } => true,
            LandauError::ZeroPart { .. } => true,
            LandauError::SearchTooLarge { .. } => true,
            LandauError::FileNotFound { .. } => true,
            LandauError::UnsupportedFormat { .. } => true,
            LandauError::InvalidAudio { .. } => true,
            _ => false,
        }
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            LandauError::PartitionMismatch { .. } => vec![
                "Make the parts add up to the clip length in whole seconds",
                "Omit the partition to let the optimal one be searched",
            ],
            LandauError::ZeroPart { .. } => vec!["Every part must be at least one second long"],
            LandauError::SearchTooLarge { .. } => vec![
                "Supply a partition explicitly instead of searching",
                "Trim the input to a shorter clip",
                "Raise the search limit if you can wait for the brute-force search",
            ],
            LandauError::FileNotFound { .. } => vec![
                "Check the file path is correct",
                "Verify the file hasn't been moved or deleted",
            ],
            LandauError::UnsupportedFormat { .. } => vec![
                "Convert the file to WAV first",
                "Supported export bit depths: 16, 24, 32 (float)",
            ],
            LandauError::InvalidAudio { .. } => vec![
                "Check if the file plays in another application",
                "The file may be corrupted - try re-exporting from source",
            ],
            LandauError::OutputTooLarge { .. } => vec![
                "Use a shorter input clip or a lower sample rate",
                "Supply a partition with a smaller LCM",
            ],
            LandauError::BufferTooLarge { .. } => vec!["Use fewer samples or channels"],
            _ => vec![],
        }
    }
}
