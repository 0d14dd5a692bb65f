/// Object-store client for uploaded images
///
/// Key-addressed blob storage over an S3-compatible bucket. Callers
/// generate collision-resistant keys (a random UUID per upload); retrieval
/// happens through a derived public URL embedded in image rendering.
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use crate::config::StorageConfig;
use crate::error::{AppError, Result};

/// Blob upload/URL interface handlers depend on, so tests can substitute a
/// scripted implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload binary content under `key`.
    async fn put_object(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<()>;

    /// Derive the publicly fetchable URL for a stored object.
    fn object_url(&self, key: &str) -> String;
}

/// S3-backed object store.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
    public_base_url: String,
}

/// Initialize the S3 client with credentials from config.
///
/// Explicit credentials and a custom endpoint (for S3-compatible storage
/// like MinIO) are optional; absent either, the default credential chain
/// and AWS endpoints apply.
pub async fn connect(config: &StorageConfig) -> S3ObjectStore {
    use aws_sdk_s3::config::Region;

    let mut builder = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.region.clone()));

    if let (Some(access_key_id), Some(secret_access_key)) =
        (&config.access_key_id, &config.secret_access_key)
    {
        use aws_sdk_s3::config::Credentials;

        let credentials = Credentials::new(
            access_key_id,
            secret_access_key,
            None,
            None,
            "picx_object_store",
        );
        builder = builder.credentials_provider(credentials);
    }

    if let Some(endpoint) = &config.endpoint {
        builder = builder.endpoint_url(endpoint);
    }

    let aws_config = builder.load().await;

    S3ObjectStore {
        client: Client::new(&aws_config),
        bucket: config.bucket.clone(),
        public_base_url: public_base_url(config),
    }
}

fn public_base_url(config: &StorageConfig) -> String {
    match &config.public_base_url {
        Some(base) => base.trim_end_matches('/').to_string(),
        None => format!(
            "https://{}.s3.{}.amazonaws.com",
            config.bucket, config.region
        ),
    }
}

impl S3ObjectStore {
    /// Health check for bucket connectivity.
    ///
    /// Validates credentials and bucket access with a single-key listing.
    pub async fn health_check(&self) -> Result<()> {
        self.client
            .list_objects_v2()
            .bucket(&self.bucket)
            .max_keys(1)
            .send()
            .await
            .map_err(|e| {
                AppError::Storage(format!(
                    "Bucket {} is not accessible: {e}",
                    self.bucket
                ))
            })?;

        tracing::info!("Object store connection validated (bucket: {})", self.bucket);
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes.to_vec()))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                let message = e.to_string();
                if message.contains("403") || message.contains("Forbidden") {
                    AppError::Storage("Upload rejected (403): check storage credentials".into())
                } else if message.contains("NoSuchBucket") {
                    AppError::Storage(format!("Bucket not found: {}", self.bucket))
                } else {
                    AppError::Storage(format!("Upload failed: {e}"))
                }
            })?;

        Ok(())
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }
}
