use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use vac_impose::layout::{FaceLayout, SlotAssignment};

#[derive(Parser)]
#[command(name = "vacp", about = "Impose A5 chart PDFs two-up for duplex printing", version)]
struct Cli {
    /// Log more detail (repeat for trace output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Impose a PDF as a booklet or as cut cards
    Impose {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file (default: <input stem>-<mode>.pdf next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print mode
        #[arg(long, default_value = "booklet", value_enum)]
        mode: ModeArg,

        /// Output sheet size
        #[arg(long, default_value = "a4", value_enum)]
        sheet: SheetArg,

        /// Load options from a JSON file (overrides --mode and --sheet)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// Print the slot layout for a page count without reading any PDF
    Plan {
        /// Number of source pages
        pages: usize,

        /// Print mode
        #[arg(long, default_value = "booklet", value_enum)]
        mode: ModeArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Booklet,
    Cut,
}

#[derive(Clone, Copy, ValueEnum)]
enum SheetArg {
    A3,
    A4,
    Letter,
    MatchSource,
}

impl From<ModeArg> for vac_impose::PrintMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Booklet => Self::Booklet,
            ModeArg::Cut => Self::Cut,
        }
    }
}

impl From<SheetArg> for vac_impose::SheetSize {
    fn from(arg: SheetArg) -> Self {
        let paper = |size| Self::Paper {
            size,
            orientation: vac_impose::Orientation::Landscape,
        };
        match arg {
            SheetArg::A3 => paper(vac_impose::PaperSize::A3),
            SheetArg::A4 => paper(vac_impose::PaperSize::A4),
            SheetArg::Letter => paper(vac_impose::PaperSize::Letter),
            SheetArg::MatchSource => Self::MatchSource,
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn describe_slot(assignment: &SlotAssignment) -> String {
    match assignment.source_page {
        Some(index) if assignment.rotated => format!("{:>3}↓", index + 1),
        Some(index) => format!("{:>3} ", index + 1),
        None => "  - ".to_string(),
    }
}

fn describe_face(face: &FaceLayout) -> String {
    format!(
        "{:<5} [{}][{}]",
        format!("{:?}", face.face),
        describe_slot(&face.left),
        describe_slot(&face.right)
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Impose {
            input,
            output,
            mode,
            sheet,
            config,
            stats_only,
        } => {
            let options = match config {
                Some(path) => vac_impose::ImpositionOptions::load(&path)
                    .await
                    .with_context(|| format!("reading options from {}", path.display()))?,
                None => vac_impose::ImpositionOptions {
                    mode: mode.into(),
                    sheet: sheet.into(),
                },
            };
            options.validate()?;
            log::debug!("Resolved options: {:?}", options);

            let document = vac_impose::load_pdf(&input)
                .await
                .with_context(|| format!("loading {}", input.display()))?;

            let stats = vac_impose::calculate_statistics(&document, options.mode);
            println!("Imposition Statistics ({}):", options.mode);
            println!("  Source pages: {}", stats.source_pages);
            println!("  Output sheets: {}", stats.output_sheets);
            println!("  Output pages: {}", stats.output_pages);
            println!("  Blank slots: {}", stats.blank_slots);
            if stats.duplicated_slots > 0 {
                println!("  Duplicated slots: {}", stats.duplicated_slots);
            }

            if stats_only {
                return Ok(());
            }

            let output = output.unwrap_or_else(|| {
                vac_impose::naming::default_output_path(&input, options.mode)
            });

            let imposed = vac_impose::impose(document, options).await?;
            vac_impose::save_pdf(imposed, &output)
                .await
                .with_context(|| format!("writing {}", output.display()))?;
            log::info!("Imposed {} → {}", input.display(), output.display());
            println!("Imposed → {}", output.display());
        }

        Commands::Plan { pages, mode } => {
            let plan = vac_impose::plan_layout(pages, mode.into());
            log::debug!("{} faces over {} sheets", plan.page_count(), plan.sheet_count());
            for (n, sheet) in plan.sheets().enumerate() {
                println!("Sheet {}", n + 1);
                println!("  {}", describe_face(sheet.recto));
                if let Some(verso) = sheet.verso {
                    println!("  {}", describe_face(verso));
                }
            }
        }
    }

    Ok(())
}
