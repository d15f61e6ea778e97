//! Image loading
//!
//! Reads problem images from disk, identifies their format, and checks that
//! they decode before they are sent inline to the model.

pub mod loader;

pub use loader::{load_image, sniff_mime};
