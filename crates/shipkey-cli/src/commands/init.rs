//! `shipkey init` and `shipkey remove`: authoring the signing properties file.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use shipkey_core::signing::{generate_key_properties, remove_key_properties, write_key_properties};

use crate::config::ResolvedConfig;

/// Write a signing properties file for release builds
#[derive(Args)]
pub struct InitArgs {
    /// Keystore path (relative paths resolve against the project root)
    #[arg(long)]
    store_file: PathBuf,

    /// Alias of the signing key inside the keystore
    #[arg(long)]
    key_alias: String,

    /// Keystore password
    #[arg(long, env = "SHIPKEY_STORE_PASSWORD", hide_env_values = true)]
    store_password: String,

    /// Key password
    #[arg(long, env = "SHIPKEY_KEY_PASSWORD", hide_env_values = true)]
    key_password: String,

    /// Overwrite an existing properties file
    #[arg(long)]
    force: bool,

    /// Print what would be written without creating the file
    #[arg(long)]
    dry_run: bool,

    /// Do not add the properties file to the project's .gitignore
    #[arg(long)]
    no_gitignore: bool,
}

pub fn handle_init_command(config: &ResolvedConfig, args: InitArgs) -> Result<()> {
    let path = &config.properties_path;

    if args.dry_run {
        let content = generate_key_properties(&args.store_file, "<hidden>", &args.key_alias, "<hidden>");
        println!("Dry run - would write {} with:", path.display());
        println!("─────────────────────────────────────");
        print!("{}", content);
        println!("─────────────────────────────────────");
        return Ok(());
    }

    let file_existed = path.exists();
    write_key_properties(
        path,
        &args.store_file,
        &args.store_password,
        &args.key_alias,
        &args.key_password,
        args.force,
    )
    .with_context(|| format!("Failed to write {}", path.display()))?;

    if file_existed {
        println!("✓ Replaced {}", path.display());
    } else {
        println!("✓ Created {}", path.display());
    }

    if !args.no_gitignore {
        if let Some(entry) = gitignore_entry(&config.project_root, path) {
            if ensure_gitignore(&config.project_root.join(".gitignore"), &entry)? {
                println!("✓ Added {} to .gitignore", entry);
            }
        }
    }

    if !config.project_root.join(&args.store_file).exists() {
        println!();
        println!(
            "Note: keystore {} does not exist yet.",
            config.project_root.join(&args.store_file).display()
        );
    }

    Ok(())
}

pub fn handle_remove_command(config: &ResolvedConfig) -> Result<()> {
    let path = &config.properties_path;
    let removed = remove_key_properties(path)
        .with_context(|| format!("Failed to remove {}", path.display()))?;

    if removed {
        println!("✓ Removed {}", path.display());
    } else {
        println!("Nothing to remove: {} does not exist", path.display());
    }

    Ok(())
}

/// The .gitignore line for `path`, if it lives inside `project_root`.
fn gitignore_entry(project_root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(project_root).ok()?;
    let entry = relative.to_str()?.replace('\\', "/");
    if entry.is_empty() {
        return None;
    }
    Some(entry)
}

/// Appends `entry` to the .gitignore at `gitignore_path` unless already listed.
///
/// Returns `true` if the file was changed.
fn ensure_gitignore(gitignore_path: &Path, entry: &str) -> Result<bool> {
    let existing = if gitignore_path.exists() {
        fs::read_to_string(gitignore_path).context("Failed to read .gitignore")?
    } else {
        String::new()
    };

    let listed = existing.lines().map(str::trim).any(|line| {
        line == entry || line.strip_prefix('/') == Some(entry) || line == "*.properties"
    });
    if listed {
        return Ok(false);
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(gitignore_path)
        .context("Failed to open .gitignore")?;

    // Add newline before if file doesn't end with newline
    if !existing.is_empty() && !existing.ends_with('\n') {
        writeln!(file)?;
    }
    writeln!(file, "{}", entry)?;

    Ok(true)
}
