//! Integration tests for the LayoutBuilder API
//!
//! These tests drive a session from element editing through rendering and a
//! real PNG export into a temporary directory.

use std::{fs, sync::Arc};

use resvg::usvg::fontdb;
use sheetcut::{
    LayoutBuilder,
    config::AppConfig,
    element::{Category, Dimension},
    export::raster::{EXPORT_FILE_NAME, ExportOutcome, RasterExporter, native::NativeHost},
    optimizer::{CutRequest, CutResponse, Optimizer, OptimizerError},
    placement::Placement,
    session::CutSession,
};

/// Places every requested element in a single row.
struct RowOptimizer;

impl Optimizer for RowOptimizer {
    async fn optimize(&self, request: &CutRequest) -> Result<CutResponse, OptimizerError> {
        let mut x = 0.0;
        let placements = request
            .elements
            .iter()
            .map(|element| {
                let placement = Placement::new(element.id, x, 0.0, element.width, element.height);
                x += element.width;
                placement
            })
            .collect();
        Ok(CutResponse { placements })
    }
}

fn png_dimensions(bytes: &[u8]) -> (u32, u32) {
    let width = u32::from_be_bytes(bytes[16..20].try_into().unwrap());
    let height = u32::from_be_bytes(bytes[20..24].try_into().unwrap());
    (width, height)
}

async fn optimized_session() -> CutSession {
    let mut session = CutSession::new();
    session.add_element();
    let door = session.add_element();
    session
        .element_mut(1)
        .unwrap()
        .set_category(Some(Category::Door));
    session.inc_element(1, Dimension::Width);
    assert_eq!(session.elements()[1].id(), door);

    assert!(session.optimize(&RowOptimizer).await);
    session
}

#[test]
fn test_builder_api_exists() {
    let builder = LayoutBuilder::default();
    assert_eq!(
        builder.config().optimizer().url(),
        "http://localhost:8081/furniture/cut"
    );
}

#[tokio::test]
async fn test_render_optimized_session() {
    let session = optimized_session().await;
    let builder = LayoutBuilder::new(AppConfig::default());

    let svg = builder.render_svg(&session.diagram()).unwrap();

    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains(r#"viewBox="0 0 2000 1000""#));
    assert!(svg.contains(r##"fill="#90caf9""##), "Door should be blue");
    assert!(svg.contains(r##"fill="#b0bec5""##), "Panel should use the default");
}

#[tokio::test]
async fn test_png_export_writes_cut_layout() {
    let session = optimized_session().await;
    let dir = tempfile::tempdir().unwrap();

    let host = NativeHost::with_fontdb(dir.path(), Arc::new(fontdb::Database::new()));
    let exporter = RasterExporter::new(host);
    let builder = LayoutBuilder::default();

    let handle = builder
        .export_png(&session.diagram(), session.placements(), &exporter)
        .unwrap()
        .expect("export should launch");
    assert_eq!(handle.await.unwrap(), ExportOutcome::Saved);

    let png = fs::read(dir.path().join(EXPORT_FILE_NAME)).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    assert_eq!(png_dimensions(&png), (2000, 1000));
    assert_eq!(exporter.host().live_object_count(), 0);
}

#[tokio::test]
async fn test_png_export_without_placements_does_nothing() {
    let session = CutSession::new();
    let dir = tempfile::tempdir().unwrap();
    let exporter = RasterExporter::new(NativeHost::with_fontdb(
        dir.path(),
        Arc::new(fontdb::Database::new()),
    ));

    let launched = LayoutBuilder::default()
        .export_png(&session.diagram(), session.placements(), &exporter)
        .unwrap();

    assert!(launched.is_none());
    assert!(!dir.path().join(EXPORT_FILE_NAME).exists());
}

#[tokio::test]
async fn test_png_export_into_unwritable_dir_is_not_saved() {
    let session = optimized_session().await;
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, b"").unwrap();

    let exporter = RasterExporter::new(NativeHost::with_fontdb(
        &blocker,
        Arc::new(fontdb::Database::new()),
    ));
    let handle = LayoutBuilder::default()
        .export_png(&session.diagram(), session.placements(), &exporter)
        .unwrap()
        .expect("export should launch");

    assert_eq!(handle.await.unwrap(), ExportOutcome::SaveFailed);
    assert_eq!(exporter.host().live_object_count(), 0);
}

#[tokio::test]
async fn test_png_export_without_placements_skips_style_checks() {
    let config: AppConfig = toml::from_str(
        r#"
        [style]
        background_color = "not-a-color"
        "#,
    )
    .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let exporter = RasterExporter::new(NativeHost::with_fontdb(
        dir.path(),
        Arc::new(fontdb::Database::new()),
    ));

    let launched = LayoutBuilder::new(config)
        .export_png(&CutSession::new().diagram(), &[], &exporter)
        .unwrap();

    assert!(launched.is_none());
}

#[test]
fn test_invalid_style_is_a_config_error() {
    let config: AppConfig = toml::from_str(
        r#"
        [style]
        background_color = "not-a-color"
        "#,
    )
    .unwrap();

    let err = LayoutBuilder::new(config)
        .render_svg(&CutSession::new().diagram())
        .unwrap_err();

    assert!(err.to_string().starts_with("Configuration error"));
}
