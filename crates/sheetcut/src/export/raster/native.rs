//! Native raster host backed by `resvg`.
//!
//! Object URLs name blobs kept in memory. Decoding parses SVG with `usvg`,
//! surfaces are `tiny-skia` pixmaps, and saving writes the blob into a
//! download directory. Parsing and encoding run on tokio's blocking pool.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

use log::{debug, error, info, warn};
use resvg::{
    tiny_skia::{Pixmap, Transform},
    usvg::{self, fontdb},
};

use sheetcut_core::geometry::Size;

use super::{Blob, PNG_MEDIA_TYPE, RasterHost};

/// A [`RasterHost`] that renders with `resvg` and saves into a directory.
#[derive(Debug)]
pub struct NativeHost {
    download_dir: PathBuf,
    objects: Mutex<HashMap<String, Blob>>,
    next_object: AtomicU64,
    fontdb: Arc<fontdb::Database>,
}

impl NativeHost {
    /// Creates a host saving into `download_dir`, with system fonts loaded.
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        let mut fontdb = fontdb::Database::new();
        fontdb.load_system_fonts();
        debug!(faces = fontdb.len(); "Loaded system fonts");

        Self::with_fontdb(download_dir, Arc::new(fontdb))
    }

    /// Creates a host using an existing font database.
    pub fn with_fontdb(download_dir: impl Into<PathBuf>, fontdb: Arc<fontdb::Database>) -> Self {
        Self {
            download_dir: download_dir.into(),
            objects: Mutex::new(HashMap::new()),
            next_object: AtomicU64::new(0),
            fontdb,
        }
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Number of object URLs that have not been revoked yet.
    pub fn live_object_count(&self) -> usize {
        self.objects().len()
    }

    fn objects(&self) -> MutexGuard<'_, HashMap<String, Blob>> {
        self.objects.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn blob_bytes(&self, url: &str) -> Option<Vec<u8>> {
        self.objects().get(url).map(|blob| blob.bytes().to_vec())
    }
}

impl RasterHost for NativeHost {
    type Image = usvg::Tree;
    type Surface = Pixmap;

    fn create_object_url(&self, blob: Blob) -> String {
        let id = self.next_object.fetch_add(1, Ordering::Relaxed);
        let url = format!("blob:sheetcut/{id}");
        self.objects().insert(url.clone(), blob);
        url
    }

    fn revoke_object_url(&self, url: &str) {
        self.objects().remove(url);
    }

    async fn decode_image(&self, url: &str) -> Option<usvg::Tree> {
        let data = self.blob_bytes(url)?;
        let fontdb = Arc::clone(&self.fontdb);

        let parsed = tokio::task::spawn_blocking(move || {
            let options = usvg::Options {
                fontdb,
                ..usvg::Options::default()
            };
            usvg::Tree::from_data(&data, &options)
        })
        .await;

        match parsed {
            Ok(Ok(tree)) => Some(tree),
            Ok(Err(err)) => {
                warn!(url, err:%; "Failed to parse SVG");
                None
            }
            Err(err) => {
                error!(url, err:%; "SVG decode task failed");
                None
            }
        }
    }

    fn create_surface(&self, width: u32, height: u32) -> Option<Pixmap> {
        Pixmap::new(width, height)
    }

    fn draw_image(&self, surface: &mut Pixmap, image: &usvg::Tree, size: Size) {
        let source = image.size();
        let transform = Transform::from_scale(
            size.width() / source.width(),
            size.height() / source.height(),
        );
        resvg::render(image, transform, &mut surface.as_mut());
    }

    async fn encode_png(&self, surface: Pixmap) -> Option<Blob> {
        match tokio::task::spawn_blocking(move || surface.encode_png()).await {
            Ok(Ok(bytes)) if !bytes.is_empty() => Some(Blob::new(PNG_MEDIA_TYPE, bytes)),
            Ok(Ok(_)) => None,
            Ok(Err(err)) => {
                warn!(err:%; "Failed to encode PNG");
                None
            }
            Err(err) => {
                error!(err:%; "PNG encode task failed");
                None
            }
        }
    }

    fn save(&self, url: &str, file_name: &str) -> io::Result<()> {
        let Some(bytes) = self.blob_bytes(url) else {
            warn!(url; "Save requested for an unknown object URL");
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("unknown object URL `{url}`"),
            ));
        };

        let path = self.download_dir.join(file_name);
        fs::create_dir_all(&self.download_dir)
            .and_then(|()| fs::write(&path, &bytes))
            .inspect_err(|err| error!(path:? = path, err:%; "Failed to save file"))?;

        info!(path:? = path, bytes = bytes.len(); "Saved file");
        Ok(())
    }
}
