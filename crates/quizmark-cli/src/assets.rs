//! Quiz stylesheet and script handling
//!
//! Pages with quiz content get the stylesheet inlined at the top and the
//! script at the bottom. For sites that link the files instead,
//! [`install_assets`] copies them under the site directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use quizmark_core::{AssetSettings, ClientSettings};
use tracing::{info, warn};

/// Stylesheet location inside a site directory
pub const STYLESHEET_TARGET: &str = "assets/stylesheets/quiz/quiz.css";
/// Script location inside a site directory
pub const SCRIPT_TARGET: &str = "assets/javascripts/quiz/quiz.js";

/// Check whether a rendered page needs the quiz assets
pub fn has_quiz_content(html: &str) -> bool {
    html.contains("quiz-form") || html.contains("exercise")
}

/// Inline the configured stylesheet and script into a page
///
/// Pages without quiz content are returned unchanged. Missing or empty
/// asset files are skipped.
pub fn inject_assets(
    html: &str,
    assets: &AssetSettings,
    client: &ClientSettings,
) -> Result<String> {
    if !has_quiz_content(html) {
        return Ok(html.to_string());
    }

    let mut page = String::with_capacity(html.len());
    if let Some(css) = read_asset(assets.stylesheet.as_deref()) {
        page.push_str(&format!("<style type=\"text/css\">\n{css}\n</style>\n"));
    }
    page.push_str(html);
    if let Some(js) = read_asset(assets.script.as_deref()) {
        let config =
            serde_json::to_string(client).context("Failed to serialize client settings")?;
        page.push_str(&format!(
            "\n<script type=\"text/javascript\" data-quiz-config='{config}'>\n{js}\n</script>"
        ));
    }
    Ok(page)
}

fn read_asset(path: Option<&Path>) -> Option<String> {
    let path = path?;
    match fs::read_to_string(path) {
        Ok(content) if !content.is_empty() => Some(content),
        Ok(_) => None,
        Err(e) => {
            warn!("Skipping asset {}: {}", path.display(), e);
            None
        }
    }
}

/// Copy the configured assets into a site directory
///
/// Returns the written paths. Unconfigured or missing sources are skipped.
pub fn install_assets(assets: &AssetSettings, site_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    let targets = [
        (assets.stylesheet.as_deref(), STYLESHEET_TARGET),
        (assets.script.as_deref(), SCRIPT_TARGET),
    ];

    for (source, target) in targets {
        let Some(source) = source else {
            continue;
        };
        if !source.exists() {
            warn!("Asset not found: {}", source.display());
            continue;
        }

        let target = site_dir.join(target);
        if let Some(dir) = target.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        fs::copy(source, &target).with_context(|| {
            format!("Failed to copy {} to {}", source.display(), target.display())
        })?;
        info!("Copied {} to {}", source.display(), target.display());
        written.push(target);
    }

    Ok(written)
}
