//! Azure Blob Storage backend.

use async_trait::async_trait;
use azure_core::error::ErrorKind;
use azure_core::StatusCode;
use azure_storage::StorageCredentials;
use azure_storage_blobs::prelude::*;
use futures::StreamExt;
use tracing::debug;
use url::Url;

use crate::config::{AuthMethod, AzureConfig};

use super::types::{BlobEntry, BlobStore, StoreError};

/// Azure Blob Storage implementation of [`BlobStore`].
///
/// Every operation is a single SDK call; retries, timeouts and transport
/// concerns are the SDK's.
#[derive(Debug)]
pub struct AzureBlobStore {
    service: BlobServiceClient,
    account: String,
}

impl AzureBlobStore {
    /// Build a store from configuration.
    ///
    /// The account name is taken from the first host label of the account URL.
    /// Credential construction failures are fatal to the caller: a store that
    /// cannot authenticate is never handed to the workflow.
    pub fn from_config(config: &AzureConfig) -> Result<Self, StoreError> {
        let account = account_name_from_url(&config.account_url)?;

        let credentials = match config.auth {
            AuthMethod::AccessKey => {
                let key = config.access_key.clone().ok_or_else(|| {
                    StoreError::AuthenticationFailed(
                        "access_key auth selected but no key configured".to_string(),
                    )
                })?;
                StorageCredentials::access_key(account.clone(), key)
            }
            AuthMethod::DefaultCredential => {
                let credential = azure_identity::create_default_credential()
                    .map_err(|e| StoreError::AuthenticationFailed(e.to_string()))?;
                StorageCredentials::token_credential(credential)
            }
        };

        debug!(account = %account, "Constructed Azure blob service client");

        Ok(Self {
            service: BlobServiceClient::new(account.clone(), credentials),
            account,
        })
    }

    /// Account name this store is bound to.
    pub fn account(&self) -> &str {
        &self.account
    }

    fn container(&self, name: &str) -> ContainerClient {
        self.service.container_client(name)
    }
}

#[async_trait]
impl BlobStore for AzureBlobStore {
    fn name(&self) -> &str {
        "azure"
    }

    async fn create_container(&self, container: &str) -> Result<(), StoreError> {
        self.container(container)
            .create()
            .public_access(PublicAccess::None)
            .await
            .map_err(|e| map_azure_error(e, container))
    }

    async fn put_blob(
        &self,
        container: &str,
        blob: &str,
        data: Vec<u8>,
        overwrite: bool,
    ) -> Result<(), StoreError> {
        let blob_client = self.container(container).blob_client(blob);

        // A block blob PUT always replaces; the no-overwrite contract is
        // enforced with an existence probe.
        if !overwrite {
            let exists = blob_client
                .exists()
                .await
                .map_err(|e| map_azure_error(e, blob))?;
            if exists {
                return Err(StoreError::BlobAlreadyExists(blob.to_string()));
            }
        }

        blob_client
            .put_block_blob(data)
            .await
            .map_err(|e| map_azure_error(e, blob))?;

        Ok(())
    }

    async fn list_blobs(&self, container: &str) -> Result<Vec<BlobEntry>, StoreError> {
        let mut stream = self.container(container).list_blobs().into_stream();

        let mut entries = Vec::new();
        while let Some(page) = stream.next().await {
            let page = page.map_err(|e| map_azure_error(e, container))?;
            for blob in page.blobs.blobs() {
                entries.push(BlobEntry {
                    name: blob.name.clone(),
                    content_length: blob.properties.content_length,
                });
            }
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn get_blob(&self, container: &str, blob: &str) -> Result<Vec<u8>, StoreError> {
        self.container(container)
            .blob_client(blob)
            .get_content()
            .await
            .map_err(|e| map_azure_error(e, blob))
    }

    async fn delete_container(&self, container: &str) -> Result<(), StoreError> {
        self.container(container)
            .delete()
            .await
            .map_err(|e| map_azure_error(e, container))
    }
}

fn account_name_from_url(account_url: &str) -> Result<String, StoreError> {
    let url = Url::parse(account_url)
        .map_err(|e| StoreError::InvalidAccountUrl(format!("{account_url}: {e}")))?;

    let host = url
        .host_str()
        .ok_or_else(|| StoreError::InvalidAccountUrl(format!("{account_url}: missing host")))?;

    let account = host
        .split('.')
        .next()
        .filter(|label| !label.is_empty())
        .ok_or_else(|| {
            StoreError::InvalidAccountUrl(format!("{account_url}: missing account label"))
        })?;

    Ok(account.to_string())
}

/// Map an SDK error to a [`StoreError`] kind by HTTP status and service error
/// code, so the orchestrator's policy can branch on kinds instead of matching
/// message text.
fn map_azure_error(err: azure_core::error::Error, target: &str) -> StoreError {
    if let Some(http) = err.as_http_error() {
        let code = http.error_code().unwrap_or_default();
        return match http.status() {
            StatusCode::Conflict if code == "ContainerAlreadyExists" => {
                StoreError::ContainerAlreadyExists(target.to_string())
            }
            StatusCode::Conflict if code == "BlobAlreadyExists" => {
                StoreError::BlobAlreadyExists(target.to_string())
            }
            StatusCode::NotFound if code == "ContainerNotFound" => {
                StoreError::ContainerNotFound(target.to_string())
            }
            StatusCode::NotFound => StoreError::BlobNotFound(target.to_string()),
            StatusCode::Unauthorized | StatusCode::Forbidden => {
                StoreError::PermissionDenied(target.to_string())
            }
            _ => StoreError::Api(err.to_string()),
        };
    }

    if matches!(err.kind(), ErrorKind::Credential) {
        return StoreError::AuthenticationFailed(err.to_string());
    }

    StoreError::Api(err.to_string())
}
