use crate::cli::{ConfigCommands, ConfigSetArgs, OutputFormat};
use crate::config::{Config, Context};
use crate::output::{OutputConfig, print_json, print_success_cfg};
use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

const MASK: &str = "********";

pub fn execute(ctx: &Context, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Path => {
            println!("{}", ctx.config_path()?.display());
            Ok(())
        }
        ConfigCommands::Show => show(ctx),
        ConfigCommands::Set(args) => set(ctx, args),
    }
}

/// Settings as the runner would see them, env and flags applied.
#[derive(Debug, Serialize)]
struct EffectiveSettings {
    base_url: String,
    valid_email: Option<String>,
    valid_password: Option<&'static str>,
    images_dir: PathBuf,
}

impl EffectiveSettings {
    fn from_context(ctx: &Context) -> Self {
        Self {
            base_url: ctx.base_url(),
            valid_email: ctx.email(),
            valid_password: ctx.password().map(|_| MASK),
            images_dir: ctx.images_dir(),
        }
    }
}

fn show(ctx: &Context) -> Result<()> {
    let settings = EffectiveSettings::from_context(ctx);
    match ctx.output_format() {
        OutputFormat::Json => print_json(&settings)?,
        OutputFormat::Table => print!("{}", toml::to_string_pretty(&settings)?),
    }
    Ok(())
}

fn set(ctx: &Context, args: ConfigSetArgs) -> Result<()> {
    let path = ctx.config_path()?;
    let updated = apply(ctx.config.clone(), args);

    updated.save_to_path(&path)?;
    debug!(path = %path.display(), "config saved");

    print_success_cfg(
        &format!("Saved {}", path.display()),
        &OutputConfig::from_context(ctx),
    );
    Ok(())
}

fn apply(mut config: Config, args: ConfigSetArgs) -> Config {
    if let Some(url) = args.url {
        config.base_url = url;
    }
    if let Some(email) = args.email {
        config.valid_email = Some(email);
    }
    if let Some(password) = args.password {
        config.valid_password = Some(password);
    }
    if let Some(images_dir) = args.images_dir {
        config.images_dir = images_dir;
    }
    config
}
