use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::primitives::ByteStreamError;
use std::error::Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadingError {
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    S3(Box<dyn Error + Send + Sync>),
    #[error(transparent)]
    ByteStream(#[from] ByteStreamError),
    #[error("Invalid credentials: {0}")]
    CredentialsError(String),
    #[error("Invalid URL: {0}")]
    InvalidURL(String),
}

impl<E: 'static, R: 'static> From<SdkError<E, R>> for LoadingError
where
    SdkError<E, R>: Error + Send + Sync,
{
    fn from(error: SdkError<E, R>) -> Self {
        LoadingError::S3(Box::new(error))
    }
}
