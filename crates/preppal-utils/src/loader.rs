use crate::loader::error::LoadingError;
use crate::loader::file::File;
use crate::loader::file_system::FileSystemLoader;
use crate::loader::s3::{S3Config, S3Loader};
use std::path::Path;
use url::Url;

pub mod error;
pub mod file;
pub mod file_system;
pub mod s3;

pub struct LoaderHandler {
    s3_client: Option<aws_sdk_s3::Client>,
}

impl LoaderHandler {
    #[must_use]
    pub fn new(s3_config: Option<S3Config>) -> Self {
        Self {
            s3_client: s3_config.map(s3::build_client),
        }
    }

    pub fn loader(&self, url: &Url) -> Result<Loader, LoadingError> {
        match url.scheme() {
            "s3" => {
                let client = self
                    .s3_client
                    .clone()
                    .ok_or_else(|| LoadingError::CredentialsError("S3 credentials not set".to_string()))?;

                let s3 = S3Loader::new(client, url)?;
                Ok(Loader::S3(s3))
            }
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|()| LoadingError::InvalidURL(url.to_string()))?;
                Ok(Loader::FileSystem(FileSystemLoader::new(path)))
            }
            scheme => Err(LoadingError::InvalidURL(format!("unsupported scheme: {scheme}"))),
        }
    }
}

#[derive(Clone, Debug)]
pub enum Loader {
    S3(S3Loader),
    FileSystem(FileSystemLoader),
}

impl LoaderTrait for Loader {
    async fn load_file<P: AsRef<Path> + Send>(&self, path: P) -> Result<File, LoadingError> {
        match self {
            Loader::S3(loader) => loader.load_file(path).await,
            Loader::FileSystem(loader) => loader.load_file(path).await,
        }
    }

    async fn store_file<P: AsRef<Path> + Send>(&self, path: P, content: &[u8]) -> Result<(), LoadingError> {
        match self {
            Loader::S3(loader) => loader.store_file(path, content).await,
            Loader::FileSystem(loader) => loader.store_file(path, content).await,
        }
    }
}

pub trait LoaderTrait {
    fn load_file<P: AsRef<Path> + Send>(&self, path: P) -> impl std::future::Future<Output = Result<File, LoadingError>> + Send;

    fn store_file<P: AsRef<Path> + Send>(
        &self,
        path: P,
        content: &[u8],
    ) -> impl std::future::Future<Output = Result<(), LoadingError>> + Send;
}
