//! Path utilities: expand ~, resolve file names against the work dir.

use std::path::{Path, PathBuf};

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Absolute (or `~/`) names are kept, bare names land in `work_dir`.
pub fn resolve_in(work_dir: &Path, file: &str) -> PathBuf {
    let p = expand_tilde(file);
    if p.is_absolute() { p } else { work_dir.join(p) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_names_are_joined_to_work_dir() {
        let wd = Path::new("/data/sheets");
        assert_eq!(
            resolve_in(wd, "timesheet_july.xlsx"),
            PathBuf::from("/data/sheets/timesheet_july.xlsx")
        );
        assert_eq!(resolve_in(wd, "/tmp/x.csv"), PathBuf::from("/tmp/x.csv"));
    }
}
