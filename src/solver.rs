//! Single-shot solve lifecycle.

use crate::ai::{GeminiHttpClient, GenerativeService};
use crate::image::load_image;
use crate::models::{Config, ImageInput, ProblemInput, SolveResult};
use crate::{assembler, Result};
use std::path::Path;
use tracing::{error, info};

/// Sends one problem to the model and normalizes the outcome.
pub struct Solver {
    config: Config,
    service: Box<dyn GenerativeService>,
}

impl Solver {
    /// Build a solver around any backend; tests inject mocks here.
    pub fn new(config: Config, service: Box<dyn GenerativeService>) -> Self {
        Self { config, service }
    }

    /// Build a solver backed by Gemini's REST API.
    pub fn gemini(config: Config) -> Self {
        let client = GeminiHttpClient::new()
            .with_base_url(config.base_url.clone())
            .with_timeout(config.request_timeout);
        Self::new(config, Box::new(client))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Structured channel: the solution text or the first error hit.
    pub async fn try_solve(&self, input: &ProblemInput) -> Result<String> {
        let api_key = self.config.require_api_key()?;

        let request = assembler::build_request(&input.text, input.image.as_ref())?;
        request.validate()?;

        info!(
            "Solving problem (text: {}, image: {})",
            if input.has_text() { "yes" } else { "no" },
            input
                .image
                .as_ref()
                .map(|i| i.mime_type())
                .unwrap_or("none")
        );

        let text = self
            .service
            .generate_content(api_key, &self.config.model, &request)
            .await?;

        info!("Solution received ({} chars)", text.len());
        Ok(text)
    }

    /// Never fails: every error becomes a [`SolveResult::Failure`].
    pub async fn solve(&self, text: &str, image: Option<ImageInput>) -> SolveResult {
        let input = ProblemInput::new(text, image);
        Self::into_result(self.try_solve(&input).await)
    }

    /// Like [`Solver::solve`], reading the image from disk inside the same
    /// failure boundary.
    pub async fn solve_with_image_file(
        &self,
        text: &str,
        image_path: Option<&Path>,
    ) -> SolveResult {
        Self::into_result(self.try_solve_with_image_file(text, image_path).await)
    }

    async fn try_solve_with_image_file(
        &self,
        text: &str,
        image_path: Option<&Path>,
    ) -> Result<String> {
        // The credential is checked before touching the filesystem.
        self.config.require_api_key()?;
        let image = image_path.map(load_image).transpose()?;
        self.try_solve(&ProblemInput::new(text, image)).await
    }

    fn into_result(outcome: Result<String>) -> SolveResult {
        match outcome {
            Ok(text) => SolveResult::success(text),
            Err(e) => {
                error!("Error solving problem: {}", e);
                e.into()
            }
        }
    }
}
