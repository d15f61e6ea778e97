pub mod client;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::GeminiHttpClient;
pub use types::{Content, GenerateContentRequest, GenerateContentResponse, InlineData, Part};
