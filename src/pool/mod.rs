//! Pool — the captured slideshow images.
//!
//! The host hands over its slideshow list once per session. The pool keeps the
//! non-null entries in their original order and exposes them read-only to the
//! shuffle engine through `PoolSupplier`.

use log::{debug, error, info, warn};

use crate::types::LOG_TAG;

/// Maximum number of sample entries logged after a capture.
const MAX_SAMPLE_LOG_COUNT: usize = 10;

/// Anything that can hand out the current ordered image collection.
///
/// `None` means the collection has never been captured; `Some(&[])` means it
/// was captured but holds nothing usable. The engine treats both the same.
pub trait PoolSupplier {
    type Image: Clone;

    fn available_images(&self) -> Option<&[Self::Image]>;
}

impl<T: Clone> PoolSupplier for Vec<T> {
    type Image = T;

    fn available_images(&self) -> Option<&[T]> {
        Some(self.as_slice())
    }
}

impl<S: PoolSupplier + ?Sized> PoolSupplier for &S {
    type Image = S::Image;

    fn available_images(&self) -> Option<&[S::Image]> {
        (**self).available_images()
    }
}

/// Session-scoped store of the images captured from the host's slideshow.
#[derive(Debug, Clone)]
pub struct BackgroundPool<T> {
    images: Option<Vec<T>>,
}

impl<T> Default for BackgroundPool<T> {
    fn default() -> Self {
        Self { images: None }
    }
}

impl<T: Clone> BackgroundPool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pool with a freshly captured list.
    ///
    /// `raw` is `None` when the host's list could not be read at all; the
    /// previous capture is kept in that case. Null entries are dropped.
    pub fn capture<I>(&mut self, raw: Option<I>)
    where
        I: IntoIterator<Item = Option<T>>,
    {
        let Some(raw) = raw else {
            error!("{LOG_TAG} Slideshow image list is missing; keeping previous pool");
            return;
        };

        let mut skipped = 0usize;
        let images: Vec<T> = raw
            .into_iter()
            .filter_map(|entry| {
                if entry.is_none() {
                    skipped += 1;
                }
                entry
            })
            .collect();

        if skipped > 0 {
            debug!("{LOG_TAG} Dropped {skipped} null slideshow entries");
        }
        if images.is_empty() {
            warn!("{LOG_TAG} All slideshow images were null after filtering");
        } else {
            info!("{LOG_TAG} Captured {} background images", images.len());
        }

        self.images = Some(images);
    }

    /// Log a short sample of the pool using `describe` for each entry.
    pub fn log_samples(&self, describe: impl Fn(&T) -> String) {
        let Some(images) = &self.images else { return };
        for (i, image) in images.iter().take(MAX_SAMPLE_LOG_COUNT).enumerate() {
            debug!("{LOG_TAG} Sample image {i}: {}", describe(image));
        }
    }

    pub fn len(&self) -> usize {
        self.images.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_captured(&self) -> bool {
        self.images.is_some()
    }
}

impl<T: Clone> PoolSupplier for BackgroundPool<T> {
    type Image = T;

    fn available_images(&self) -> Option<&[T]> {
        self.images.as_deref()
    }
}
