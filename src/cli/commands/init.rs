use crate::cli::parser::Cli;
use crate::config::Config;
use crate::config::profile::Profile;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use std::fs;

/// Handle the `init` command
///
/// Creates, when missing:
///  - the config directory
///  - the configuration file (`--dir` becomes its `work_dir`)
///  - an empty profile
///  - the work directory itself
pub fn handle(cli: &Cli) -> AppResult<()> {
    let created = Config::init_all(cli.dir.as_deref())?;

    let cfg = Config::load()?;
    let work_dir = match &cli.dir {
        Some(d) => crate::utils::path::expand_tilde(d),
        None => cfg.work_dir(),
    };
    fs::create_dir_all(&work_dir)?;

    info("Initializing rInvoicer…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("👤 Profile     : {}", Profile::profile_file().display());
    println!("📁 Work dir    : {}", work_dir.display());

    if created.is_empty() {
        info("Configuration already present, nothing to create.");
    } else {
        for path in &created {
            success(format!("Created {}", path.display()));
        }
    }

    let missing = Profile::load()?.missing_fields();
    if !missing.is_empty() {
        info(format!(
            "Fill in the profile before invoicing: rinvoicer profile --set-name … (missing: {})",
            missing.join(", ")
        ));
    }

    Ok(())
}
