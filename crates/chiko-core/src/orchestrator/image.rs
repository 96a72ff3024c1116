//! Image generation and editing

use super::core::RequestOrchestrator;
use super::slot::Slot;
use super::types::ImageRequest;
use crate::classify::Failure;
use crate::error::Result;
use chiko_llm::{ContentRequest, ImageArtifact};
use tracing::{info, instrument, warn};

/// Failure text when a generation response carries no media part
pub(crate) const NO_IMAGE_DATA: &str = "No image data found in response";

impl RequestOrchestrator {
    /// Generate an image from a prompt, style and aspect ratio
    #[instrument(skip(self, request), fields(style = %request.style, ratio = %request.aspect_ratio))]
    pub async fn generate_image(&self, request: &ImageRequest) -> Result<ImageArtifact> {
        let _guard = self.acquire(Slot::Generate)?;
        let credential = self.prepare().await?;

        let content = ContentRequest::new(&self.config.image_model)
            .with_text(request.prompt_text())
            .with_aspect_ratio(request.aspect_ratio);

        let response = self
            .transport
            .generate_content(credential, content)
            .await
            .map_err(|e| {
                warn!(error = %e, "Image generation failed");
                self.classify(e)
            })?;

        match response.first_media() {
            Some(image) => {
                info!(mime = %image.mime_type, bytes = image.data.len(), "Image generated");
                Ok(image.clone())
            }
            None => Err(self.classify(Failure::Unknown(NO_IMAGE_DATA.to_string())).into()),
        }
    }

    /// Edit `source` according to `instruction`.
    ///
    /// The request carries the image first, then the text. A text-only
    /// answer is the provider declining, surfaced verbatim.
    #[instrument(skip(self, source, instruction), fields(mime = %source.mime_type))]
    pub async fn edit_image(
        &self,
        source: &ImageArtifact,
        instruction: &str,
    ) -> Result<ImageArtifact> {
        let _guard = self.acquire(Slot::Edit)?;
        let credential = self.prepare().await?;

        let content = ContentRequest::new(&self.config.image_model)
            .with_image(source.clone())
            .with_text(instruction);

        let response = self
            .transport
            .generate_content(credential, content)
            .await
            .map_err(|e| {
                warn!(error = %e, "Image edit failed");
                self.classify(e)
            })?;

        if let Some(image) = response.first_media() {
            info!(mime = %image.mime_type, bytes = image.data.len(), "Image edited");
            return Ok(image.clone());
        }

        let failure = match response.first_text() {
            Some(text) => {
                warn!("Model answered the edit with text only");
                Failure::Refusal(text.to_string())
            }
            None => Failure::Unknown(self.classifier.locale().edit_without_image().to_string()),
        };
        Err(self.classify(failure).into())
    }
}
