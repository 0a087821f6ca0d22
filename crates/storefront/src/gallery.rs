//! Product image gallery.

/// Classes marking the active thumbnail.
pub const ACTIVE_THUMBNAIL_CLASSES: [&str; 2] = ["ring-2", "ring-primary-500"];

/// The main image swap requested by a thumbnail click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSwap {
    pub src: String,
    pub alt: String,
}

impl ImageSwap {
    /// Read a thumbnail's `data-full-image` and `data-alt` attributes.
    ///
    /// Returns `None` when the thumbnail has no full-size image, in which case
    /// the click changes nothing.
    #[must_use]
    pub fn from_thumbnail(full_image: Option<String>, alt: Option<String>) -> Option<Self> {
        let src = full_image.filter(|s| !s.trim().is_empty())?;
        Some(Self {
            src,
            alt: alt.unwrap_or_default(),
        })
    }
}
