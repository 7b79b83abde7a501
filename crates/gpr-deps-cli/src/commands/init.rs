//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# gpr-deps configuration

[report]
# Show the file imports that explain each project dependency
show_source = false

# Only show what should change in the project files.
# Set to false to list every dependency.
show_diff = true

[analysis]
# Comma-separated projects that only share settings and have no sources.
# They are never reported as "should be removed".
no_source_projects = "shared"

# Keep one justifying import per dependency. Setting this to false
# collects every import, which is much slower on large trees.
single_file = true
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new("gpr-deps.toml"), force)?;

    println!("Created gpr-deps.toml");
    println!("\nNext steps:");
    println!("  1. Edit gpr-deps.toml, e.g. list your settings-only projects");
    println!("  2. Run: gpr-deps check <snapshot>");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;
    Ok(())
}
