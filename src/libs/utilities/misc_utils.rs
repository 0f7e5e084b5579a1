// Small helpers shared by the installers, the config loader and the report.

use chrono::Duration;
use std::path::PathBuf;

/// Expands a leading `~` into the home directory.
/// Paths without a tilde, or when the home directory is unknown, come back unchanged.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// First line of a (possibly multi-line) version banner, trimmed.
///
/// `terraform -version` prints a provider list and an upgrade notice after
/// the version; only the first line is worth a log line.
pub fn first_line(output: &str) -> &str {
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
}

/// Converts an elapsed step time into a short string for the summary table.
///
/// - `850ms` below one second
/// - `12s` below one minute
/// - `3m 07s` otherwise
pub fn format_elapsed(elapsed: &Duration) -> String {
    let millis = elapsed.num_milliseconds().max(0);
    if millis < 1_000 {
        format!("{millis}ms")
    } else if elapsed.num_seconds() < 60 {
        format!("{}s", elapsed.num_seconds())
    } else {
        format!("{}m {:02}s", elapsed.num_minutes(), elapsed.num_seconds() % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line_truncates_version_banners() {
        let banner = "Terraform v1.9.5\non darwin_arm64\n\nYour version of Terraform is out of date!";
        assert_eq!(first_line(banner), "Terraform v1.9.5");
        assert_eq!(first_line("\n  v20.11.1  \n"), "v20.11.1");
        assert_eq!(first_line(""), "");
    }

    #[test]
    fn elapsed_picks_a_readable_unit() {
        assert_eq!(format_elapsed(&Duration::milliseconds(850)), "850ms");
        assert_eq!(format_elapsed(&Duration::seconds(12)), "12s");
        assert_eq!(format_elapsed(&Duration::seconds(187)), "3m 07s");
        assert_eq!(format_elapsed(&Duration::milliseconds(-5)), "0ms");
    }

    #[test]
    fn expand_path_leaves_absolute_paths_alone() {
        assert_eq!(expand_path("/usr/local/bin"), PathBuf::from("/usr/local/bin"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~/.zprofile"), home.join(".zprofile"));
        }
    }
}
