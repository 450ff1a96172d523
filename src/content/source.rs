use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

pub(super) fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read content from {}", path.display()))
}
