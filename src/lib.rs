//! Landau Looper - polyrhythmic audio from the Landau function
//!
//! g(n), the Landau function, is the largest LCM of any partition of n.
//! Splitting an n-second clip by such a partition and looping every piece
//! independently gives loops that only all realign after g(n) seconds.
//!
//! # Architecture
//!
//! - `partition`: partition enumeration and the exhaustive g(n) search
//! - `looper`: segmenting, loop mixing and peak normalization
//! - `engine`: the audio buffer type and WAV I/O
//! - `observer`: progress events reported by the search and the looper

pub mod cli;
pub mod engine;
pub mod error;
pub mod looper;
pub mod observer;
pub mod partition;

pub use engine::AudioBuffer;
pub use error::{LandauError, Result};
pub use looper::{landau_audio_loop, LoopOutput, Looper, LooperConfig};
pub use partition::{landau, LandauResult, Partition};
