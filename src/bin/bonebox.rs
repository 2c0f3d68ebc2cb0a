use bonebox::annotations::AssociationMode;
use bonebox::common::Result;
use bonebox::config::{DEFAULT_BONE_SET, PipelineConfig};
use bonebox::ooxml::drawings::ScalingMode;
use bonebox::pipeline::{Pipeline, SlideSelection, SlideSource, Stages};
use bonebox::regions::calibrate::{Calibration, IndexedOffset, calibrate_file};
use bonebox::regions::layout::{DEFAULT_TOLERANCE, LayoutJob};
use bonebox::regions::ClassifierMode;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract colored regions into slideN_colored_regions.json
    Regions {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        regions: RegionArgs,
    },
    /// Extract white labels and their pointer lines into slideN_text_annotations.json
    Annotations {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        annotations: AnnotationArgs,
    },
    /// Regions and annotations, plus the aggregate and the run summary
    Run {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        regions: RegionArgs,
        #[command(flatten)]
        annotations: AnnotationArgs,
    },
    /// Shift the coordinates of a written region file per image
    Calibrate {
        /// Region file to calibrate
        #[arg(short, long)]
        input: PathBuf,
        /// Where to write the result (defaults to the input file)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Offset as INDEX:DX,DY; repeat for several images
        #[arg(long = "offset", required = true, num_args = 1..)]
        offsets: Vec<IndexedOffset>,
    },
    /// Build the side-by-side layout template and per-slide metadata
    Layout {
        #[arg(long)]
        slides_dir: PathBuf,
        /// Directory of slideN.xml.rels, for resolving media
        #[arg(long)]
        rels_dir: Option<PathBuf>,
        #[arg(long, num_args = 1.., default_values_t = [2, 3])]
        slides: Vec<u32>,
        /// Slide the template is taken from
        #[arg(long, default_value_t = 2)]
        representative: u32,
        #[arg(long)]
        out_template: PathBuf,
        #[arg(long)]
        out_metadata: PathBuf,
        /// Compare every slide against the template
        #[arg(long)]
        audit: bool,
        #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
        tolerance: f64,
        /// Minimum picture area, as a fraction of the largest picture
        #[arg(long, default_value_t = 0.05)]
        min_area: f64,
        #[arg(long, default_value = DEFAULT_BONE_SET)]
        bone_set: String,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Directory holding slideN.xml
    #[arg(long)]
    slides_dir: PathBuf,
    /// Directory holding slideN.xml.rels
    #[arg(long)]
    rels_dir: PathBuf,
    /// Slide number, comma-separated numbers, or "all"
    #[arg(long)]
    slide: SlideSelection,
    /// Output directory
    #[arg(long)]
    out: PathBuf,
    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Process slides one at a time
    #[arg(long)]
    sequential: bool,
}

#[derive(Args)]
struct RegionArgs {
    #[arg(long, value_enum)]
    classifier: Option<ClassifierMode>,
    #[arg(long, value_enum)]
    scaling: Option<ScalingMode>,
}

#[derive(Args)]
struct AnnotationArgs {
    #[arg(long, value_enum)]
    association: Option<AssociationMode>,
    /// Lines per label in nearest mode
    #[arg(long)]
    k: Option<usize>,
    /// Label box padding in EMU
    #[arg(long)]
    padding: Option<i64>,
    /// Junction snap grid in EMU
    #[arg(long)]
    snap: Option<i64>,
}

impl SourceArgs {
    fn config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::load(path)?,
            None => PipelineConfig::default(),
        };
        if self.sequential {
            config.parallel = false;
        }
        Ok(config)
    }
}

impl RegionArgs {
    fn apply(&self, config: &mut PipelineConfig) {
        if let Some(classifier) = self.classifier {
            config.classifier = classifier;
        }
        if let Some(scaling) = self.scaling {
            config.scaling = scaling;
        }
    }
}

impl AnnotationArgs {
    fn apply(&self, config: &mut PipelineConfig) {
        if let Some(association) = self.association {
            config.association = association;
        }
        if let Some(k) = self.k {
            config.nearest_k = k;
        }
        if let Some(padding) = self.padding {
            config.padding = padding;
        }
        if let Some(snap) = self.snap {
            config.snap = snap;
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "bonebox failed");
            ExitCode::FAILURE
        },
    }
}

fn execute(command: Commands) -> Result<()> {
    match command {
        Commands::Regions { source, regions } => {
            let mut config = source.config()?;
            regions.apply(&mut config);
            extract(source, config, Stages::REGIONS)
        },
        Commands::Annotations {
            source,
            annotations,
        } => {
            let mut config = source.config()?;
            annotations.apply(&mut config);
            extract(source, config, Stages::ANNOTATIONS)
        },
        Commands::Run {
            source,
            regions,
            annotations,
        } => {
            let mut config = source.config()?;
            regions.apply(&mut config);
            annotations.apply(&mut config);
            extract(source, config, Stages::ALL)
        },
        Commands::Calibrate {
            input,
            output,
            offsets,
        } => {
            let calibration: Calibration = offsets.iter().map(|o| (o.index, o.offset)).collect();
            let output = output.unwrap_or_else(|| input.clone());
            calibrate_file(&input, &output, &calibration)?;
            Ok(())
        },
        Commands::Layout {
            slides_dir,
            rels_dir,
            slides,
            representative,
            out_template,
            out_metadata,
            audit,
            tolerance,
            min_area,
            bone_set,
        } => {
            let job = LayoutJob {
                slides_dir,
                rels_dir,
                slides,
                representative,
                bone_set,
                min_area_fraction: min_area,
                audit: audit.then_some(tolerance),
            };
            job.write(&out_template, &out_metadata)
        },
    }
}

fn extract(args: SourceArgs, config: PipelineConfig, stages: Stages) -> Result<()> {
    config.validate()?;
    let source = SlideSource::new(&args.slides_dir, &args.rels_dir)?;
    let summary = Pipeline::new(config, source, &args.out, stages).run(&args.slide)?;
    info!(
        processed = summary.processed_count(),
        skipped = summary.skipped_count(),
        out = %args.out.display(),
        "done"
    );
    Ok(())
}
