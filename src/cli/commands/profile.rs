use crate::cli::parser::Commands;
use crate::config::profile::Profile;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};

/// Handle the `profile` subcommand
pub fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::Profile {
        print,
        name,
        employee_id,
        department,
        rate,
        opening_leaves,
    } = cmd
    {
        let path = Profile::profile_file();
        let mut profile = Profile::load_from(&path)?;
        let mut changed = false;

        let mut set_text = |field: &mut Option<String>, value: &Option<String>| {
            if let Some(v) = value {
                *field = Some(v.trim().to_string());
                changed = true;
            }
        };
        set_text(&mut profile.name, name);
        set_text(&mut profile.employee_id, employee_id);
        set_text(&mut profile.department, department);

        if let Some(r) = rate {
            if !r.is_finite() || *r <= 0.0 {
                return Err(AppError::Config(format!("daily rate must be positive, got {r}")));
            }
            profile.daily_rate = Some(*r);
            changed = true;
        }
        if let Some(n) = opening_leaves {
            profile.opening_leave_balance = *n;
            changed = true;
        }

        if changed {
            profile.save()?;
            success(format!("Profile updated: {}", path.display()));
        }

        if *print || !changed {
            println!("👤 Profile ({}):\n", path.display());
            println!("{}", serde_yaml::to_string(&profile)?);
        }

        let missing = profile.missing_fields();
        if missing.is_empty() {
            if let Some((month, balance)) = profile.leave_history.iter().next_back() {
                info(format!("Leave balance after {month}: {balance}"));
            }
        } else {
            warning(format!("Missing for invoicing: {}", missing.join(", ")));
        }
    }

    Ok(())
}
