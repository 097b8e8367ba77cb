//! Audio Engine Module
//!
//! - Audio buffer type and level analysis
//! - WAV file I/O and the synthetic demo signal

pub mod buffer;
pub mod io;

pub use buffer::{AudioBuffer, BufferShape};
pub use io::{
    default_output_path, demo_signal, export_audio, import_audio, landau_audio_loop_from_file,
    ExportFormat, FileLoopOutcome,
};
