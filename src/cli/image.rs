//! CLI commands: `chiko image generate` and `chiko image edit`

use super::{EditArgs, GenerateArgs, ToolArg};
use crate::app;
use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chiko_core::{EditTool, ImageRequest};
use chiko_llm::ImageArtifact;
use std::path::{Path, PathBuf};
use tracing::info;

/// Generate an image and write it to disk
pub async fn generate(args: GenerateArgs) -> Result<()> {
    let config = app::load_config()?;
    let orchestrator = app::build_orchestrator(&config)?;

    let request = ImageRequest::new(args.prompt)
        .with_style(args.style)
        .with_aspect_ratio(args.ratio);

    println!("  Lagi gambar... ({}, {})", request.style, request.aspect_ratio);
    let image = orchestrator.generate_image(&request).await?;

    let path = write_artifact(&image, args.output).await?;
    println!("  Jadi! Disimpan di {}", path.display());
    Ok(())
}

/// Edit an image with a photo studio tool and write the result to disk
pub async fn edit(args: EditArgs) -> Result<()> {
    let custom = args.prompt.as_deref().map(str::trim).filter(|p| !p.is_empty());
    let instruction = match custom {
        Some(prompt) => prompt.to_string(),
        None => edit_tool(args.tool, &args).instruction()?,
    };

    let source = read_artifact(&args.input).await?;

    let config = app::load_config()?;
    let orchestrator = app::build_orchestrator(&config)?;

    println!("  Lagi diedit...");
    let image = orchestrator.edit_image(&source, &instruction).await?;

    let path = write_artifact(&image, args.output).await?;
    println!("  Beres! Disimpan di {}", path.display());
    Ok(())
}

fn edit_tool(tool: ToolArg, args: &EditArgs) -> EditTool {
    let description = args.description.clone().unwrap_or_default();
    match tool {
        ToolArg::Tone => EditTool::Tone(args.filter),
        ToolArg::Remove => EditTool::Remove(description),
        ToolArg::Outfit => EditTool::Outfit(description),
        ToolArg::Enhance => EditTool::Enhance,
    }
}

async fn read_artifact(path: &Path) -> Result<ImageArtifact> {
    let mime = mime_for_path(path)
        .with_context(|| format!("Unsupported image type: {}", path.display()))?;
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if bytes.is_empty() {
        bail!("{} is empty", path.display());
    }
    Ok(ImageArtifact::new(mime, STANDARD.encode(bytes)))
}

async fn write_artifact(image: &ImageArtifact, output: Option<PathBuf>) -> Result<PathBuf> {
    let bytes = STANDARD
        .decode(image.data.as_bytes())
        .context("Provider returned malformed image data")?;

    let path = output.unwrap_or_else(|| default_output(&image.mime_type));
    tokio::fs::write(&path, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), bytes = bytes.len(), "Image saved");
    Ok(path)
}

fn default_output(mime: &str) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    PathBuf::from(format!("chiko-{}.{}", stamp, extension_for_mime(mime)))
}

fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        _ => "png",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chiko_core::ToneFilter;

    fn edit_args(tool: ToolArg, description: Option<&str>) -> EditArgs {
        EditArgs {
            input: PathBuf::from("in.png"),
            tool,
            filter: ToneFilter::Vintage,
            description: description.map(str::to_string),
            prompt: None,
            output: None,
        }
    }

    #[test]
    fn test_edit_tool_mapping() {
        let args = edit_args(ToolArg::Tone, None);
        assert_eq!(edit_tool(args.tool, &args), EditTool::Tone(ToneFilter::Vintage));

        let args = edit_args(ToolArg::Remove, None);
        assert!(edit_tool(args.tool, &args).instruction().is_err());
    }

    #[test]
    fn test_mime_round_trip() {
        assert_eq!(mime_for_path(Path::new("a/b/FOTO.JPG")), Some("image/jpeg"));
        assert_eq!(mime_for_path(Path::new("x.gif")), None);
        assert_eq!(extension_for_mime("image/webp"), "webp");
        assert_eq!(extension_for_mime("application/octet-stream"), "png");
    }

    #[tokio::test]
    async fn test_read_and_write_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("source.png");
        tokio::fs::write(&input, b"\x89PNG fake").await.unwrap();

        let artifact = read_artifact(&input).await.unwrap();
        assert_eq!(artifact.mime_type, "image/png");

        let output = dir.path().join("out.png");
        let written = write_artifact(&artifact, Some(output.clone())).await.unwrap();
        assert_eq!(written, output);
        assert_eq!(tokio::fs::read(&output).await.unwrap(), b"\x89PNG fake");
    }

    #[tokio::test]
    async fn test_read_rejects_unknown_type() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("notes.txt");
        tokio::fs::write(&input, b"hi").await.unwrap();
        assert!(read_artifact(&input).await.is_err());
    }
}
