use std::io;
use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use bmpro::api::{process_bmp_to_path, process_directory_to_path};
use bmpro::core::params::PipelineParams;

use super::args::CliArgs;
use super::errors::AppError;
use super::prompt::Prompter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Start from the config file (or defaults) and apply explicit flags on top.
/// Any per-analysis flag enables that analysis.
fn resolve_params(args: &CliArgs) -> Result<PipelineParams, AppError> {
    let mut params = match &args.config {
        Some(path) => {
            info!("Loading parameters from {:?}", path);
            PipelineParams::from_json_file(path)?
        }
        None => PipelineParams::default(),
    };

    if let Some(scale) = args.scale {
        params.scale = scale;
    }
    params.tint_inverse |= args.tint_inverse;
    params.blur |= args.blur;
    params.sepia |= args.sepia;
    params.report |= args.report;

    if args.fill || args.fill_tolerance.is_some() || args.seed_row.is_some() || args.seed_col.is_some()
    {
        let fill = params.fill.get_or_insert_with(Default::default);
        if let Some(t) = args.fill_tolerance {
            fill.tolerance = t;
        }
        if let Some(r) = args.seed_row {
            fill.seed.0 = r;
        }
        if let Some(c) = args.seed_col {
            fill.seed.1 = c;
        }
    }

    if args.contour || args.contour_tolerance.is_some() || args.suppress_radius.is_some() {
        let contour = params.contour.get_or_insert_with(Default::default);
        if let Some(t) = args.contour_tolerance {
            contour.tolerance = t;
        }
        if let Some(r) = args.suppress_radius {
            contour.suppress_radius = r;
        }
    }

    if args.lines
        || args.max_gap_run.is_some()
        || args.search_radius.is_some()
        || args.min_line_length.is_some()
    {
        let lines = params.lines.get_or_insert_with(Default::default);
        if let Some(g) = args.max_gap_run {
            lines.max_gap_run = g;
        }
        if let Some(r) = args.search_radius {
            lines.search_radius = r;
        }
        if let Some(l) = args.min_line_length {
            lines.min_line_length = l;
        }
    }

    params.validate()?;
    Ok(params)
}

fn process_single_file(
    input: &PathBuf,
    output_dir: Option<&PathBuf>,
    params: &PipelineParams,
) -> Result<(), AppError> {
    let summary = process_bmp_to_path(input, output_dir.map(PathBuf::as_path), params)?;
    for (kind, path) in summary.artifacts() {
        println!("{}: {}", kind, path.display());
    }
    info!("Successfully processed: {:?}", input);
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        init_logging();
    }

    let mut params = resolve_params(&args)?;

    if args.needs_prompt() {
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stdout());
        let input = prompter.ask_pipeline(&mut params)?;
        params.validate()?;
        process_single_file(&input, args.output_dir.as_ref(), &params)?;
        return Ok(());
    }

    let batch_mode = args.batch || args.input_dir.is_some();

    if batch_mode {
        let input_dir = args.input_dir.ok_or(AppError::MissingArgument {
            arg: "--input-dir".to_string(),
        })?;
        let output_dir = args.output_dir.ok_or(AppError::MissingArgument {
            arg: "--output-dir".to_string(),
        })?;

        info!("Starting batch processing from directory: {:?}", input_dir);
        info!("Output directory: {:?}", output_dir);

        let report = process_directory_to_path(&input_dir, &output_dir, &params, args.batch)?;
        println!(
            "processed={} skipped={} errors={}",
            report.processed, report.skipped, report.errors
        );
    } else {
        let input = args.input.ok_or(AppError::MissingArgument {
            arg: "--input".to_string(),
        })?;
        process_single_file(&input, args.output_dir.as_ref(), &params)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bmpro::core::params::{ContourParams, LineParams};

    #[test]
    fn defaults_without_flags() {
        let params = resolve_params(&CliArgs::default()).unwrap();
        assert_eq!(params, PipelineParams::default());
    }

    #[test]
    fn analysis_flags_enable_branches() {
        let args = CliArgs {
            scale: Some(1.0),
            blur: true,
            contour_tolerance: Some(20),
            lines: true,
            min_line_length: Some(4),
            ..CliArgs::default()
        };
        let params = resolve_params(&args).unwrap();
        assert_eq!(params.scale, 1.0);
        assert!(params.blur);
        assert!(params.fill.is_none());
        assert_eq!(
            params.contour,
            Some(ContourParams {
                tolerance: 20,
                ..ContourParams::default()
            })
        );
        assert_eq!(
            params.lines,
            Some(LineParams {
                min_line_length: 4,
                ..LineParams::default()
            })
        );
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        std::fs::write(&path, r#"{ "scale": 3.0, "sepia": true, "fill": { "tolerance": 7 } }"#)
            .unwrap();
        let args = CliArgs {
            config: Some(path),
            scale: Some(1.5),
            seed_col: Some(4),
            ..CliArgs::default()
        };
        let params = resolve_params(&args).unwrap();
        assert_eq!(params.scale, 1.5);
        assert!(params.sepia);
        let fill = params.fill.unwrap();
        assert_eq!(fill.tolerance, 7);
        assert_eq!(fill.seed, (0, 4));
    }

    #[test]
    fn invalid_scale_is_rejected() {
        let args = CliArgs {
            scale: Some(0.0),
            ..CliArgs::default()
        };
        assert!(matches!(resolve_params(&args), Err(AppError::Bmpro(_))));
    }
}
