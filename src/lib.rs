//! Universal problem solver backed by a generative vision model
//!
//! Assembles a problem's text and optional image into a single multi-part
//! Gemini request, sends it once, and formats the answer for display.

pub mod ai;
pub mod assembler;
pub mod display;
pub mod error;
pub mod image;
pub mod models;
pub mod prompts;
pub mod solver;

pub use error::{Error, Result};
pub use models::{Config, FailureKind, ImageInput, ProblemInput, SolveResult};
pub use solver::Solver;
