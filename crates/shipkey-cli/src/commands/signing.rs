//! Signing resolution commands: `resolve`, `check`, and `inspect`.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;
use shipkey_core::signing::{inspect_keystore, resolve, FileSource, Resolution, SigningSummary};
use shipkey_core::variant::{BuildType, BuildTypes};

use crate::config::{check_file_permissions, ResolvedConfig};

/// Show the resolved release signing config
#[derive(Args)]
pub struct ResolveArgs {
    /// Print machine-readable JSON
    #[arg(long)]
    json: bool,
}

/// Check that a build type can be signed
#[derive(Args)]
pub struct CheckArgs {
    /// Build type to check (debug or release)
    #[arg(long, default_value = "release")]
    build_type: BuildType,
}

/// Report the type and size of the configured keystore
#[derive(Args)]
pub struct InspectArgs {
    /// Print machine-readable JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolveOutput {
    properties: PathBuf,
    configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    signing: Option<SigningSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
}

/// Resolves the signing config at the configured location.
///
/// A missing file resolves to [`Resolution::Absent`]; an incomplete one is an error.
fn load_resolution(config: &ResolvedConfig) -> Result<Resolution> {
    let source = FileSource::new(&config.properties_path);
    check_file_permissions(source.path());

    resolve(&source, &config.project_root).with_context(|| {
        format!(
            "Invalid signing properties in {}",
            config.properties_path.display()
        )
    })
}

pub fn handle_resolve_command(config: &ResolvedConfig, args: ResolveArgs) -> Result<()> {
    let resolution = load_resolution(config)?;

    if args.json {
        let output = ResolveOutput {
            properties: config.properties_path.clone(),
            configured: resolution.is_configured(),
            signing: resolution.config().map(|c| c.summary()),
            warning: resolution.warning(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Release Signing");
    println!("{}", "=".repeat(50));
    println!();
    println!("  Properties:     {}", config.properties_path.display());

    match resolution.config() {
        Some(signing) => {
            let summary = signing.summary();
            let keystore_state = if summary.store_file.exists() {
                "found"
            } else {
                "missing"
            };
            println!("  Status:         Configured");
            println!(
                "  Keystore:       {} ({})",
                summary.store_file.display(),
                keystore_state
            );
            println!("  Key alias:      {}", summary.key_alias);
            println!("  Store password: {}", mask(summary.store_password_set));
            println!("  Key password:   {}", mask(summary.key_password_set));
        }
        None => {
            println!("  Status:         Not configured");
            println!();
            println!("  Debug builds are unaffected.");
            println!("  Run 'shipkey init' to create the properties file.");
        }
    }

    Ok(())
}

pub fn handle_check_command(config: &ResolvedConfig, args: CheckArgs) -> Result<()> {
    let resolution = load_resolution(config)?;
    let build_types = BuildTypes::from_resolution(resolution);
    let build = build_types.get(args.build_type);

    build
        .ensure_signable()
        .with_context(|| format!("Cannot sign {} build", args.build_type))?;

    println!("✓ {} build is ready", args.build_type);
    println!("  Minify:           {}", on_off(build.minify_enabled));
    println!("  Shrink resources: {}", on_off(build.shrink_resources));
    match &build.signing {
        Some(signing) => println!(
            "  Signing:          {} ({})",
            signing.key_alias,
            signing.store_file.display()
        ),
        None => println!("  Signing:          none"),
    }

    Ok(())
}

pub fn handle_inspect_command(config: &ResolvedConfig, args: InspectArgs) -> Result<()> {
    let resolution = load_resolution(config)?;
    let Some(signing) = resolution.config() else {
        bail!(
            "No signing config: {}",
            resolution.warning().unwrap_or_default()
        );
    };

    let info = inspect_keystore(&signing.store_file)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Keystore");
    println!("{}", "=".repeat(50));
    println!();
    println!("  Path:  {}", info.path.display());
    println!("  Type:  {}", info.keystore_type);
    println!("  Size:  {} bytes", info.size_bytes);
    println!("  Alias: {}", signing.key_alias);

    Ok(())
}

fn mask(set: bool) -> &'static str {
    if set { "********" } else { "Not set" }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}
