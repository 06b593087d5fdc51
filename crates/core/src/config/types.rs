use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub storage: StorageConfig,
    #[serde(default)]
    pub workflow: WorkflowConfig,
}

/// Storage account configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Storage backend type
    pub backend: StorageBackend,
    /// Azure-specific configuration (required when backend = "azure")
    #[serde(default)]
    pub azure: Option<AzureConfig>,
}

/// Available storage backends
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    Azure,
    // Future: S3, Gcs
}

/// Azure Blob Storage backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AzureConfig {
    /// Account endpoint URL (e.g., "https://myaccount.blob.core.windows.net/")
    pub account_url: String,
    /// How to authenticate against the account
    #[serde(default)]
    pub auth: AuthMethod,
    /// Shared account key (required when auth = "access_key")
    #[serde(default)]
    pub access_key: Option<String>,
}

/// Authentication method for the storage account
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    /// Credential chain: environment, managed identity, Azure CLI login.
    #[default]
    DefaultCredential,
    /// Shared account key.
    AccessKey,
}

/// Workflow configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkflowConfig {
    /// Container the run creates, fills and finally deletes.
    #[serde(default = "default_container")]
    pub container: String,
    /// Local file names to upload, resolved against `work_dir`.
    #[serde(default = "default_upload_files")]
    pub upload_files: Vec<String>,
    /// Directory holding the sample files and receiving the downloads.
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,
    /// Prefix prepended to a blob name to form its local download name.
    #[serde(default = "default_download_prefix")]
    pub download_prefix: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            container: default_container(),
            upload_files: default_upload_files(),
            work_dir: default_work_dir(),
            download_prefix: default_download_prefix(),
        }
    }
}

fn default_container() -> String {
    "mytestcontainer".to_string()
}

fn default_upload_files() -> Vec<String> {
    vec!["sample1.txt".to_string(), "sample2.docx".to_string()]
}

fn default_work_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_download_prefix() -> String {
    "downloaded_".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_config() {
        let toml = r#"
[storage]
backend = "azure"

[storage.azure]
account_url = "https://acct.blob.core.windows.net/"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Azure);

        let azure = config.storage.azure.as_ref().unwrap();
        assert_eq!(azure.account_url, "https://acct.blob.core.windows.net/");
        assert_eq!(azure.auth, AuthMethod::DefaultCredential);
        assert!(azure.access_key.is_none());
    }

    #[test]
    fn test_deserialize_with_default_workflow() {
        let toml = r#"
[storage]
backend = "azure"

[storage.azure]
account_url = "https://acct.blob.core.windows.net/"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.workflow.container, "mytestcontainer");
        assert_eq!(
            config.workflow.upload_files,
            vec!["sample1.txt", "sample2.docx"]
        );
        assert_eq!(config.workflow.work_dir, PathBuf::from("."));
        assert_eq!(config.workflow.download_prefix, "downloaded_");
    }

    #[test]
    fn test_deserialize_missing_storage_fails() {
        let toml = r#"
[workflow]
container = "c1"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_access_key_auth() {
        let toml = r#"
[storage]
backend = "azure"

[storage.azure]
account_url = "https://acct.blob.core.windows.net/"
auth = "access_key"
access_key = "secret"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let azure = config.storage.azure.as_ref().unwrap();
        assert_eq!(azure.auth, AuthMethod::AccessKey);
        assert_eq!(azure.access_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_deserialize_custom_workflow() {
        let toml = r#"
[storage]
backend = "azure"

[storage.azure]
account_url = "https://acct.blob.core.windows.net/"

[workflow]
container = "c1"
upload_files = ["a.txt", "b.txt"]
work_dir = "/tmp/blobrun"
download_prefix = "fetched_"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.workflow.container, "c1");
        assert_eq!(config.workflow.upload_files, vec!["a.txt", "b.txt"]);
        assert_eq!(config.workflow.work_dir, PathBuf::from("/tmp/blobrun"));
        assert_eq!(config.workflow.download_prefix, "fetched_");
    }
}
