// Asset loading with placeholder substitution

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Load a text asset and substitute `${{KEY}}` placeholders.
///
/// Each `(key, value)` pair replaces every literal `${{key}}` occurrence,
/// in pair order. Placeholders with no matching key are left verbatim.
pub fn load_asset(assets_dir: &Path, name: &str, swaps: &[(&str, &str)]) -> Result<String> {
    let path = assets_dir.join(name);
    let mut text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read asset: {}", path.display()))?;

    for (key, value) in swaps {
        let placeholder = ["${{", key, "}}"].concat();
        text = text.replace(&placeholder, value);
    }

    Ok(text)
}
