use serde::{Deserialize, Serialize};

use crate::extract::rules::{MIN_IMAGE_HEIGHT, MIN_IMAGE_WIDTH};

/// How rendered size and visibility affect images in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImagePolicy {
    /// Drop small or hidden images from both the content and the image list
    Filter,
    /// Keep every discovered image
    KeepAll,
}

/// Configuration for the extraction pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Image size/visibility policy (default: filter)
    pub image_policy: ImagePolicy,

    /// Minimum rendered image width in CSS pixels under `filter` (default: 100)
    pub min_image_width: f64,

    /// Minimum rendered image height in CSS pixels under `filter` (default: 100)
    pub min_image_height: f64,

    /// Element budget handed to the readability parser (default: 9000)
    pub max_elements_to_parse: usize,

    /// Include background images declared in same-origin stylesheets (default: true)
    pub collect_stylesheet_images: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            image_policy: ImagePolicy::Filter,
            min_image_width: MIN_IMAGE_WIDTH,
            min_image_height: MIN_IMAGE_HEIGHT,
            max_elements_to_parse: 9000,
            collect_stylesheet_images: true,
        }
    }
}

impl ExtractionConfig {
    /// Keep every image regardless of size
    pub fn keep_all_images() -> Self {
        Self {
            image_policy: ImagePolicy::KeepAll,
            ..Default::default()
        }
    }
}
