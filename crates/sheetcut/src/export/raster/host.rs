//! Host primitives used by the raster pipeline.
//!
//! The pipeline never touches files, decoders or pixel buffers directly. It
//! goes through a [`RasterHost`], which hands out temporary object URLs for
//! blobs, decodes them into images, draws them onto raster surfaces and
//! encodes the result as PNG.

use std::{future::Future, io, sync::Arc};

use log::trace;

use sheetcut_core::geometry::Size;

/// Binary data tagged with a media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    media_type: String,
    bytes: Vec<u8>,
}

impl Blob {
    pub fn new(media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            media_type: media_type.into(),
            bytes,
        }
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// The environment the raster pipeline runs against.
///
/// Every URL returned by [`create_object_url`](Self::create_object_url) stays
/// valid until it is passed to [`revoke_object_url`](Self::revoke_object_url).
/// Implementations must tolerate concurrent calls from several exports.
pub trait RasterHost: Send + Sync + 'static {
    /// A decoded image that can be drawn onto a surface.
    type Image: Send + 'static;

    /// A pixel buffer with a drawing context.
    type Surface: Send + 'static;

    /// Registers `blob` and returns a URL addressing it.
    fn create_object_url(&self, blob: Blob) -> String;

    /// Releases the blob addressed by `url`.
    fn revoke_object_url(&self, url: &str);

    /// Decodes the blob addressed by `url`, or `None` if it is not a readable image.
    fn decode_image(&self, url: &str) -> impl Future<Output = Option<Self::Image>> + Send;

    /// Allocates a surface of `width` x `height` pixels, or `None` if no drawing context is available.
    fn create_surface(&self, width: u32, height: u32) -> Option<Self::Surface>;

    /// Draws `image` at the origin, stretched to `size`.
    fn draw_image(&self, surface: &mut Self::Surface, image: &Self::Image, size: Size);

    /// Encodes `surface` as PNG, or `None` if encoding produced no data.
    fn encode_png(&self, surface: Self::Surface) -> impl Future<Output = Option<Blob>> + Send;

    /// Saves the blob addressed by `url` under `file_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` is unknown or the blob could not be written.
    fn save(&self, url: &str, file_name: &str) -> io::Result<()>;
}

/// An object URL that is revoked when dropped.
///
/// # Examples
///
/// ```ignore
/// let source = ObjectUrl::create(&host, Blob::new("image/svg+xml", markup));
/// let image = host.decode_image(source.url()).await;
/// source.revoke();
/// ```
#[derive(Debug)]
pub struct ObjectUrl<H: RasterHost> {
    host: Arc<H>,
    url: Option<String>,
}

impl<H: RasterHost> ObjectUrl<H> {
    /// Registers `blob` with `host`.
    pub fn create(host: &Arc<H>, blob: Blob) -> Self {
        let url = host.create_object_url(blob);
        trace!(url; "Created object URL");
        Self {
            host: Arc::clone(host),
            url: Some(url),
        }
    }

    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or_default()
    }

    /// Revokes the URL now instead of at the end of scope.
    pub fn revoke(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(url) = self.url.take() {
            trace!(url; "Revoking object URL");
            self.host.revoke_object_url(&url);
        }
    }
}

impl<H: RasterHost> Drop for ObjectUrl<H> {
    fn drop(&mut self) {
        self.release();
    }
}
