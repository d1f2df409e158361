use crate::config::types::{ComicEntry, Config, HttpConfig, OutputConfig};
use crate::crawler::directory_name;
use crate::url::ensure_http;
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    validate_comics(&config.comics)?;
    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "connect_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.root_directory.trim().is_empty() {
        return Err(ConfigError::Validation(
            "root_directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates comic entries
///
/// Destination folders are derived from titles, so two titles that sanitize to
/// the same folder name are rejected as well as exact duplicates.
fn validate_comics(comics: &[ComicEntry]) -> Result<(), ConfigError> {
    if comics.is_empty() {
        return Err(ConfigError::Validation(
            "At least one [[comic]] entry is required".to_string(),
        ));
    }

    let mut folders = HashSet::new();
    for entry in comics {
        let folder = directory_name(&entry.title);
        if folder.is_empty() || folder == "." || folder == ".." {
            return Err(ConfigError::Validation(format!(
                "Comic title '{}' does not yield a usable folder name",
                entry.title
            )));
        }

        if !folders.insert(folder.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "Comic title '{}' collides with another entry's folder '{}'",
                entry.title, folder
            )));
        }

        validate_start_url(entry)?;
    }

    Ok(())
}

fn validate_start_url(entry: &ComicEntry) -> Result<(), ConfigError> {
    let url = Url::parse(&entry.start_url).map_err(|e| {
        ConfigError::InvalidUrl(format!(
            "Invalid start URL '{}' for '{}': {}",
            entry.start_url, entry.title, e
        ))
    })?;

    ensure_http(&url).map_err(|e| {
        ConfigError::InvalidUrl(format!(
            "Start URL '{}' for '{}': {}",
            entry.start_url, entry.title, e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Site;

    fn entry(title: &str, start_url: &str) -> ComicEntry {
        ComicEntry {
            title: title.to_string(),
            site: Site::CtrlAltDel,
            start_url: start_url.to_string(),
        }
    }

    fn make_config(comics: Vec<ComicEntry>) -> Config {
        Config {
            http: HttpConfig::default(),
            output: OutputConfig {
                root_directory: "./comics".to_string(),
            },
            comics,
        }
    }

    #[test]
    fn test_valid_config() {
        let config = make_config(vec![
            entry("Ctrl+Alt+Del", "http://cad-comic.com/comic/nice-melon/"),
            entry("Sillies", "https://cad-comic.com/comic/25864/"),
        ]);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_no_comics() {
        assert!(matches!(
            validate(&make_config(vec![])),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_duplicate_titles() {
        let config = make_config(vec![
            entry("Sillies", "http://cad-comic.com/comic/1/"),
            entry("Sillies", "http://cad-comic.com/comic/2/"),
        ]);
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_titles_colliding_after_sanitizing() {
        let config = make_config(vec![
            entry("What?", "http://cad-comic.com/comic/1/"),
            entry("What", "http://cad-comic.com/comic/2/"),
        ]);
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_unusable_folder_names() {
        for title in ["", "   ", "???", "..", "/"] {
            let config = make_config(vec![entry(title, "http://cad-comic.com/")]);
            assert!(
                matches!(validate(&config), Err(ConfigError::Validation(_))),
                "title {:?} should be rejected",
                title
            );
        }
    }

    #[test]
    fn test_invalid_start_url() {
        let config = make_config(vec![entry("Sillies", "not a url")]);
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));

        let config = make_config(vec![entry("Sillies", "ftp://cad-comic.com/")]);
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_http_limits() {
        let mut config = make_config(vec![entry("Sillies", "http://cad-comic.com/")]);
        config.http.timeout_secs = 0;
        assert!(validate(&config).is_err());

        config.http.timeout_secs = 30;
        config.http.user_agent = "  ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_root_directory() {
        let mut config = make_config(vec![entry("Sillies", "http://cad-comic.com/")]);
        config.output.root_directory = String::new();
        assert!(validate(&config).is_err());
    }
}
