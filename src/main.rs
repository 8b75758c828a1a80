use batchcrop::imaging::RustBackend;
use batchcrop::types::{CropRect, CropSpec, DisplaySize, PreviewSpec};
use batchcrop::{catalog, crop, naming, output, selection, validate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Shared crop rectangle flags for commands that need one.
#[derive(clap::Args, Clone)]
struct CropParamArgs {
    /// Crop offset from the left edge
    #[arg(long, default_value_t = 0)]
    x: u32,

    /// Crop offset from the top edge
    #[arg(long, default_value_t = 0)]
    y: u32,

    /// Crop width
    #[arg(long, default_value_t = 50)]
    width: u32,

    /// Crop height
    #[arg(long, default_value_t = 50)]
    height: u32,

    /// Treat the crop values as preview-cell pixels instead of native pixels
    #[arg(long)]
    preview_scale: bool,

    /// Preview cell width
    #[arg(long, default_value_t = 100)]
    cell_width: u32,

    /// Preview cell height
    #[arg(long, default_value_t = 100)]
    cell_height: u32,
}

impl CropParamArgs {
    fn spec(&self) -> CropSpec {
        let rect = CropRect::new(self.x, self.y, self.width, self.height);
        if self.preview_scale {
            CropSpec::PreviewScale(rect)
        } else {
            CropSpec::OriginalScale(rect)
        }
    }

    fn preview(&self) -> PreviewSpec {
        PreviewSpec::new(self.cell_width, self.cell_height)
    }
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "batchcrop")]
#[command(about = "Apply one crop rectangle to every image in a dataset directory")]
#[command(long_about = "\
Apply one crop rectangle to every image in a dataset directory

One rectangle, authored once, is applied to every image in the input
directory. Values are native pixels by default; with --preview-scale they
are preview-cell pixels, mapped into each image's native space per image.

Dataset structure:

  shoot-0412/                      # --input
  ├── 001.jpg                      # cropped → cropped/001-cropped.jpg
  ├── 002.JPG                      # extension match is case-insensitive
  ├── portrait.png                 # keeps its format on output
  ├── notes.txt                    # skipped (unsupported extension)
  └── raw/                         # skipped (never descended into)

Images the rectangle does not fit are reported and left untouched, and one
unreadable file never aborts the batch.

Run 'batchcrop check' to preview per-image eligibility without writing.")]
#[command(version = version_string())]
struct Cli {
    /// Input dataset directory
    #[arg(long, default_value = ".", global = true)]
    input: PathBuf,

    /// Output directory for cropped copies
    #[arg(long, default_value = "cropped", global = true)]
    output: PathBuf,

    /// Worker threads (0 = all cores)
    #[arg(long, default_value_t = 0, global = true)]
    threads: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inventory the dataset: dimensions, previews, eligibility
    Scan {
        #[command(flatten)]
        params: CropParamArgs,

        /// Also write the catalog as JSON
        #[arg(long)]
        manifest: Option<PathBuf>,
    },
    /// Validate crop parameters and report per-image eligibility
    Check(CropParamArgs),
    /// Crop every selected image into the output directory
    Crop {
        #[command(flatten)]
        params: CropParamArgs,

        /// Crop only this file (by name, repeatable); default is every eligible image
        #[arg(long)]
        only: Vec<String>,

        /// Also write the batch report as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_thread_pool(cli.threads);

    match cli.command {
        Command::Scan { params, manifest } => {
            let spec = params.spec();
            let preview = params.preview();
            validate::validate(spec, preview, None)?;

            let catalog = catalog::build(&cli.input, spec, preview)?;
            if let Some(path) = manifest {
                let json = serde_json::to_string_pretty(&catalog.manifest())?;
                std::fs::write(&path, json)?;
            }
            output::print_scan_output(&catalog);
        }
        Command::Check(params) => {
            let spec = params.spec();
            let preview = params.preview();
            validate::validate(spec, preview, None)?;

            println!("==> Checking {}", cli.input.display());
            let report = catalog::probe(&cli.input, spec, preview)?;
            output::print_probe_output(&report);
            println!("==> Parameters are valid");
        }
        Command::Crop {
            params,
            only,
            report,
        } => {
            let spec = params.spec();
            let preview = params.preview();
            validate::validate(spec, preview, None)?;

            println!("==> Stage 1: Scanning {}", cli.input.display());
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_catalog_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let mut catalog =
                catalog::build_with_backend(&RustBackend::new(), &cli.input, spec, preview, Some(tx))?;
            printer.join().unwrap();

            if !only.is_empty() {
                let unmatched = selection::select_only(&mut catalog.entries, &only);
                if !unmatched.is_empty() {
                    return Err(
                        format!("No such image in the dataset: {}", unmatched.join(", ")).into(),
                    );
                }
            }

            let out_dir = naming::resolve_output_dir(&cli.output);
            std::fs::create_dir_all(&out_dir)?;

            println!(
                "==> Stage 2: Cropping {} of {} images into {}",
                selection::selected_count(&catalog.entries),
                catalog.entries.len(),
                out_dir.display()
            );
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_crop_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let batch = crop::run_with_backend(
                &RustBackend::new(),
                &catalog.entries,
                spec,
                preview,
                DisplaySize::from(preview),
                &cli.output,
                Some(tx),
            )?;
            printer.join().unwrap();

            if let Some(path) = report {
                let json = serde_json::to_string_pretty(&batch)?;
                std::fs::write(&path, json)?;
            }
            output::print_batch_report(&batch, &out_dir);
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool from the --threads flag.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(requested: usize) {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let threads = if requested == 0 {
        cores
    } else {
        requested.min(cores)
    };
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
