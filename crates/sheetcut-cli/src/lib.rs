//! CLI logic for the Sheetcut layout tool.
//!
//! Loads a job file, optionally runs it through the optimizer, and writes
//! the resulting layout as SVG or PNG.

pub mod error_adapter;

mod args;
mod config;
mod job;

pub use args::{Args, OutputFormat};
pub use job::Job;

use std::{fs, path::Path};

use log::{info, warn};

use sheetcut::{
    LayoutBuilder, SheetcutError,
    config::AppConfig,
    export::raster::{EXPORT_FILE_NAME, ExportOutcome, RasterExporter, native::NativeHost},
    optimizer::http::HttpOptimizer,
    session::CutSession,
};

/// Name of the SVG file written for [`OutputFormat::Svg`].
pub const SVG_FILE_NAME: &str = "cut-layout.svg";

/// Run the Sheetcut CLI application
///
/// # Errors
///
/// Returns `SheetcutError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid job files
/// - Optimizer failures (with `--optimize`)
/// - Export errors
pub fn run(args: &Args) -> Result<(), SheetcutError> {
    info!(
        input_path = args.input,
        output_dir = args.output_dir,
        format:? = args.format;
        "Processing cut job"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let job = Job::load(&args.input)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(process(args, app_config, job.into_session()))
}

async fn process(
    args: &Args,
    app_config: AppConfig,
    mut session: CutSession,
) -> Result<(), SheetcutError> {
    if args.optimize {
        let optimizer = HttpOptimizer::from_config(app_config.optimizer());
        info!(url = optimizer.url(); "Optimizing cut job");

        if !session.optimize(&optimizer).await {
            return Err(SheetcutError::Optimizer(
                "job has no elements or an invalid sheet".to_string(),
            ));
        }
        if let Some(message) = session.error_message() {
            return Err(SheetcutError::Optimizer(message.to_string()));
        }
    }

    for placement in session.overflowing_placements() {
        warn!(
            id:? = placement.id(),
            x = placement.x(),
            y = placement.y();
            "Placement extends beyond the sheet"
        );
    }

    let output_dir = Path::new(&args.output_dir);
    let builder = LayoutBuilder::new(app_config);
    let diagram = session.diagram();

    match args.format {
        OutputFormat::Svg => {
            let svg = builder.render_svg(&diagram)?;
            fs::create_dir_all(output_dir)?;
            let path = output_dir.join(SVG_FILE_NAME);
            fs::write(&path, svg)?;
            info!(output_file = path.display().to_string(); "SVG exported successfully");
        }
        OutputFormat::Png => {
            let path = output_dir.join(EXPORT_FILE_NAME);
            if path.exists() {
                fs::remove_file(&path)?;
            }

            let exporter = RasterExporter::new(NativeHost::new(output_dir));
            let Some(handle) = builder.export_png(&diagram, session.placements(), &exporter)?
            else {
                warn!("Job has no placements, nothing to export");
                return Ok(());
            };

            let outcome = handle
                .await
                .map_err(|err| SheetcutError::Export(Box::new(err)))?;
            if outcome != ExportOutcome::Saved || !path.exists() {
                return Err(SheetcutError::Export(
                    format!("PNG export did not complete: {outcome:?}").into(),
                ));
            }
            info!(output_file = path.display().to_string(); "PNG exported successfully");
        }
    }

    Ok(())
}
