//! Check a layout file for structural problems.

use std::collections::HashSet;
use std::path::Path;

use dockit_core::layout::inspect;

use crate::error::CliError;
use crate::util::load_layout;

/// Validate command handler
pub fn cmd_validate(file: &Path, kinds: Option<&[String]>) -> Result<(), CliError> {
    let layout = load_layout(file)?;
    let known_kinds: Option<HashSet<String>> = kinds.map(|kinds| kinds.iter().cloned().collect());
    let issues = inspect(&layout, known_kinds.as_ref());

    if issues.is_empty() {
        let noun = if layout.widget_count() == 1 {
            "widget"
        } else {
            "widgets"
        };
        println!("{}: OK ({} {noun})", file.display(), layout.widget_count());
        return Ok(());
    }

    for issue in &issues {
        println!("{}: {issue}", file.display());
    }
    Err(CliError::Invalid { count: issues.len() })
}
