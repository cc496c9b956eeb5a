use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Returned when a card carries no image URIs at all
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no image URIs for card")]
pub struct NoImageUris;

/// Image renditions available for a card face
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ImageUris {
    pub small: String,
    pub normal: String,
    pub large: String,
    pub png: String,
    pub art_crop: String,
    pub border_crop: String,
}

impl ImageUris {
    /// Smallest available rendition, preferring JPEG images
    pub fn lowest_quality(&self) -> Result<&str, NoImageUris> {
        Self::first_present([
            &self.small,
            &self.normal,
            &self.large,
            &self.png,
            &self.art_crop,
            &self.border_crop,
        ])
    }

    /// Largest available rendition, preferring JPEG images
    pub fn highest_quality(&self) -> Result<&str, NoImageUris> {
        Self::first_present([
            &self.large,
            &self.normal,
            &self.small,
            &self.png,
            &self.art_crop,
            &self.border_crop,
        ])
    }

    fn first_present<const N: usize>(candidates: [&String; N]) -> Result<&str, NoImageUris> {
        candidates
            .into_iter()
            .find(|uri| !uri.is_empty())
            .map(String::as_str)
            .ok_or(NoImageUris)
    }
}

/// Image rendition requested from image-returning endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageType {
    /// Smallest JPEG
    Small,
    /// Medium JPEG
    Normal,
    /// Largest JPEG
    Large,
    /// Transparent PNG
    Png,
    /// Artwork only
    ArtCrop,
    /// Card with rounded border removed
    BorderCrop,
}

impl ImageType {
    /// Query-string representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Normal => "normal",
            Self::Large => "large",
            Self::Png => "png",
            Self::ArtCrop => "art_crop",
            Self::BorderCrop => "border_crop",
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
