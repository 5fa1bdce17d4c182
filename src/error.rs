use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unrecognized image data, expected png or jpeg")]
    UnsupportedFormat,

    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode {format} image: {source}")]
    Encode {
        format: &'static str,
        #[source]
        source: image::ImageError,
    },

    #[error("overlay asset {name:?} is missing or unreadable: {source}")]
    AssetRead {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("overlay asset {name:?} is not a valid png: {source}")]
    AssetDecode {
        name: &'static str,
        #[source]
        source: image::ImageError,
    },

    #[error("detection service unreachable: {0}")]
    ServiceUnavailable(#[source] reqwest::Error),

    #[error("detection service error: {0}")]
    ServiceError(String),
}

pub type Result<T> = std::result::Result<T, Error>;
