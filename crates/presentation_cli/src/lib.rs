//! Clausewise command-line front end
//!
//! Argument parsing, report rendering and the WAV-file audio output used
//! by the `clausewise` binary.

pub mod cli;
pub mod render;
pub mod wav_output;

pub use cli::{AnalyzeArgs, Cli, Commands};
pub use render::{JsonReport, render_report};
pub use wav_output::WavFileOutput;
