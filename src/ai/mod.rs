//! AI service integration for problem solving
//!
//! Provides the seam between the solver and the generative model backend,
//! with a Gemini REST implementation and a deterministic mock.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiHttpClient;
pub use mock::MockGenerativeService;

use crate::Result;
use async_trait::async_trait;
use gemini::GenerateContentRequest;

#[async_trait]
pub trait GenerativeService: Send + Sync {
    /// Issues one `generateContent` call and returns the answer text.
    async fn generate_content(
        &self,
        api_key: &str,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<String>;
}

#[async_trait]
impl<T: GenerativeService + ?Sized> GenerativeService for std::sync::Arc<T> {
    async fn generate_content(
        &self,
        api_key: &str,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<String> {
        (**self).generate_content(api_key, model, request).await
    }
}
