//! Layout statistics command.

use std::path::Path;

use dockit_core::layout::stats;

use crate::error::CliError;
use crate::util::load_layout;

/// Stats command handler
pub fn cmd_stats(file: &Path) -> Result<(), CliError> {
    let layout = load_layout(file)?;
    let stats = stats(&layout);

    println!("DockIt Layout Statistics");
    println!("========================\n");

    println!("File:      {}", file.display());
    println!("Widgets:   {}", stats.widgets);
    println!("Tab areas: {}", stats.tab_areas);
    println!("Splits:    {}", stats.splits);
    println!("Depth:     {}", stats.depth);

    if !stats.kinds.is_empty() {
        println!("\nBy kind:");
        for (kind, count) in &stats.kinds {
            println!("  {kind}: {count}");
        }
    }

    Ok(())
}
