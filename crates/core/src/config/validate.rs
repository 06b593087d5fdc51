use url::Url;

use super::{
    types::{AuthMethod, Config, StorageBackend},
    ConfigError,
};

/// Validate configuration
///
/// The placeholder check is the workflow's single fatal error class: an
/// account URL still carrying a `<...>` template token means the operator
/// never substituted real account details, and the run must not reach the
/// storage service.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    match config.storage.backend {
        StorageBackend::Azure => {
            let azure = config.storage.azure.as_ref().ok_or_else(|| {
                ConfigError::ValidationError(
                    "storage.azure section is required when backend = \"azure\"".to_string(),
                )
            })?;

            validate_account_url(&azure.account_url)?;

            if azure.auth == AuthMethod::AccessKey
                && azure.access_key.as_deref().map_or(true, str::is_empty)
            {
                return Err(ConfigError::ValidationError(
                    "storage.azure.access_key is required when auth = \"access_key\"".to_string(),
                ));
            }
        }
    }

    validate_container_name(&config.workflow.container)?;

    if config.workflow.download_prefix.is_empty() {
        return Err(ConfigError::ValidationError(
            "workflow.download_prefix cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_account_url(account_url: &str) -> Result<(), ConfigError> {
    if account_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "storage.azure.account_url cannot be empty".to_string(),
        ));
    }

    if account_url.contains('<') || account_url.contains('>') {
        return Err(ConfigError::PlaceholderAccountUrl(account_url.to_string()));
    }

    Url::parse(account_url).map_err(|e| {
        ConfigError::ValidationError(format!(
            "storage.azure.account_url is not a valid URL ({account_url}): {e}"
        ))
    })?;

    Ok(())
}

/// Container naming rules: lowercase letters, digits and dashes, starting and
/// ending with a letter or digit, no consecutive dashes, at most 63
/// characters. Length minimums are left to the service.
fn validate_container_name(name: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| {
        ConfigError::ValidationError(format!("workflow.container \"{name}\" {reason}"))
    };

    if name.is_empty() || name.len() > 63 {
        return Err(invalid("must be 1-63 characters long"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(invalid(
            "may only contain lowercase letters, digits and dashes",
        ));
    }
    if name.starts_with('-') || name.ends_with('-') {
        return Err(invalid("must start and end with a letter or digit"));
    }
    if name.contains("--") {
        return Err(invalid("may not contain consecutive dashes"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AzureConfig, StorageConfig, WorkflowConfig};

    fn config_with_url(account_url: &str) -> Config {
        Config {
            storage: StorageConfig {
                backend: StorageBackend::Azure,
                azure: Some(AzureConfig {
                    account_url: account_url.to_string(),
                    auth: AuthMethod::DefaultCredential,
                    access_key: None,
                }),
            },
            workflow: WorkflowConfig::default(),
        }
    }

    #[test]
    fn test_validate_valid_config() {
        let config = config_with_url("https://acct.blob.core.windows.net/");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_placeholder_url_fails() {
        let config =
            config_with_url("https://<your_storage_account_name>.blob.core.windows.net/");
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::PlaceholderAccountUrl(_)));
    }

    #[test]
    fn test_validate_empty_url_fails() {
        let config = config_with_url("");
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_unparseable_url_fails() {
        let config = config_with_url("not a url");
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_missing_azure_section_fails() {
        let config = Config {
            storage: StorageConfig {
                backend: StorageBackend::Azure,
                azure: None,
            },
            workflow: WorkflowConfig::default(),
        };
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_access_key_auth_without_key_fails() {
        let mut config = config_with_url("https://acct.blob.core.windows.net/");
        config.storage.azure.as_mut().unwrap().auth = AuthMethod::AccessKey;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));

        config.storage.azure.as_mut().unwrap().access_key = Some("key".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_container_names() {
        let valid = ["c1", "c-1", "abc", "mytestcontainer", "a1b2c3"];
        for name in valid {
            let mut config = config_with_url("https://acct.blob.core.windows.net/");
            config.workflow.container = name.to_string();
            assert!(validate_config(&config).is_ok(), "expected {name} valid");
        }

        let invalid = ["", "Has-Upper", "under_score", "-leading", "trailing-", "a--b"];
        for name in invalid {
            let mut config = config_with_url("https://acct.blob.core.windows.net/");
            config.workflow.container = name.to_string();
            assert!(validate_config(&config).is_err(), "expected {name} invalid");
        }
    }

    #[test]
    fn test_validate_empty_download_prefix_fails() {
        let mut config = config_with_url("https://acct.blob.core.windows.net/");
        config.workflow.download_prefix = String::new();
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
