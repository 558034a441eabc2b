use crate::loader::error::LoadingError;
use crate::loader::file::{File, FileMetadata};
use crate::loader::LoaderTrait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region, SharedCredentialsProvider};
use aws_sdk_s3::Client;
use chrono::{DateTime, Utc};
use clap::Args;
use num_traits::cast::ToPrimitive;
use std::error::Error;
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Debug, Clone, Args)]
#[allow(clippy::struct_field_names)]
pub struct S3Config {
    #[arg(long = "s3-endpoint", required = false)]
    pub endpoint: Url,
    #[arg(long = "s3-region", required = false)]
    pub region: String,
    #[arg(long = "s3-access_key", required = false)]
    pub access_key: String,
    #[arg(long = "s3-secret_key", required = false)]
    pub secret_key: String,
}

#[must_use]
pub fn build_client(config: S3Config) -> Client {
    let credentials = Credentials::new(config.access_key, config.secret_key, None, None, "preppal");
    let s3_config = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .endpoint_url(config.endpoint.to_string())
        .region(Region::new(config.region))
        .credentials_provider(SharedCredentialsProvider::new(credentials))
        .force_path_style(true)
        .build();
    Client::from_conf(s3_config)
}

#[derive(Clone, Debug)]
pub struct S3Loader {
    client: Client,
    bucket: String,
    prefix: String,
}

impl S3Loader {
    pub fn new(client: Client, url: &Url) -> Result<Self, LoadingError> {
        let bucket_name = url
            .host_str()
            .ok_or_else(|| LoadingError::InvalidURL(url.to_string()))?;
        let base_path = url.path();
        Ok(Self {
            client,
            bucket: bucket_name.to_owned(),
            prefix: base_path.strip_prefix("/").unwrap_or(base_path).into(),
        })
    }

    fn sub_key(&self, path: impl AsRef<Path>) -> String {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return self.prefix.clone();
        }
        PathBuf::from(&self.prefix).join(path).to_string_lossy().to_string()
    }
}

fn aws_datetime_to_chrono(date_time: aws_smithy_types::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_nanos(
        // Default to January 1, 1970, UTC.
        date_time.as_nanos().to_i64().unwrap_or_default(),
    )
}

impl LoaderTrait for S3Loader {
    async fn load_file<P: AsRef<Path> + Send>(&self, path: P) -> Result<File, LoadingError> {
        let key = self.sub_key(path);
        tracing::debug!(?key, "loading object from s3");
        let object = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, key, "failed to get object"))?;
        let last_modified = object.last_modified.map(aws_datetime_to_chrono);
        let bytes = object
            .body
            .collect()
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, key, "failed to get object body"))?
            .to_vec();
        tracing::trace!(key, ?last_modified, size = bytes.len(), "loaded object");
        let metadata = FileMetadata::new(key, last_modified);
        Ok(File::new(metadata, bytes))
    }

    async fn store_file<P: AsRef<Path> + Send>(&self, path: P, content: &[u8]) -> Result<(), LoadingError> {
        let key = self.sub_key(path);
        tracing::debug!(?key, size = content.len(), "storing object in s3");
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(content.to_vec().into())
            .send()
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, key, "failed to put object"))?;
        Ok(())
    }
}
