//! Shared helpers used across command modules.

use std::path::Path;

use dockit_core::layout::SerializedLayout;
use tracing::debug;

use crate::error::CliError;

/// Reads and parses a layout file.
pub fn load_layout(path: &Path) -> Result<SerializedLayout, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let layout = SerializedLayout::from_json(&text).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        widgets = layout.widget_count(),
        "layout file loaded"
    );
    Ok(layout)
}
