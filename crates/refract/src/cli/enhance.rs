//! The `refract enhance` command.

use anyhow::Context;
use clap::Args;
use refract_core::{EnhancementRequest, ImageInput, Refract};
use std::path::PathBuf;

/// Arguments for the `enhance` command.
#[derive(Args, Debug)]
pub struct EnhanceArgs {
    /// Prompt to rewrite (may be percent-encoded)
    pub prompt: String,

    /// Target image model (flux, turbo, kontext, gptimage, ...)
    #[arg(short, long, default_value = "flux")]
    pub model: String,

    /// Seed forwarded to the completion service
    #[arg(short, long, default_value_t = 42)]
    pub seed: i64,

    /// Image to edit: a file path, a data URL, or an http(s) URL
    #[arg(short, long)]
    pub image: Option<String>,

    /// Issue the same request this many times (repeats hit the cache)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub repeat: u32,
}

/// Execute the enhance command.
///
/// Fails on an unreadable or invalid config file instead of using defaults.
pub async fn execute(args: EnhanceArgs) -> anyhow::Result<()> {
    let mut request = EnhancementRequest::new(args.prompt, args.model, args.seed);
    if let Some(image) = args.image.as_deref() {
        request = request.with_image(resolve_image(image)?);
    }

    let refract = Refract::from_default_config().context("Failed to set up the enhancer")?;
    let mut enhanced = String::new();
    for attempt in 1..=args.repeat {
        enhanced = refract.enhance(&request).await;
        tracing::debug!(
            "Attempt {attempt}/{}: {} cached result(s)",
            args.repeat,
            refract.cached()
        );
    }

    println!("{enhanced}");
    Ok(())
}

/// Turn the `--image` argument into an image reference for the request.
///
/// URLs pass through untouched; anything else is read from disk and embedded
/// as a base64 data URL.
fn resolve_image(value: &str) -> anyhow::Result<String> {
    if value.starts_with("data:") || value.starts_with("http://") || value.starts_with("https://") {
        return Ok(value.to_string());
    }

    let path = PathBuf::from(shellexpand::tilde(value).into_owned());
    let image = ImageInput::from_path(&path)
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    Ok(image.data_url())
}
