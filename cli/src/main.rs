//! slidecut CLI - turn editor documents into presentation slides

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use slidecut::render::{escape_html, SkipImagesVisitor};
use slidecut::{
    DeckResult, Document, JsonFormat, OverflowStrategy, RenderOptions, SegmentOptions,
    SlideContent, Slidecut,
};

#[derive(Parser)]
#[command(name = "slidecut")]
#[command(version)]
#[command(about = "Split block-based editor documents into presentation slides", long_about = None)]
struct Cli {
    /// Input document (editor JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print slides as JSON
    Slides {
        /// Input document (editor JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(short, long)]
        compact: bool,

        #[command(flatten)]
        segment: SegmentArgs,
    },

    /// Render slides into a standalone HTML page
    Html {
        /// Input document (editor JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Omit `bn-*` class attributes
        #[arg(long)]
        no_classes: bool,

        /// Leave images out of the slides
        #[arg(long)]
        skip_images: bool,

        /// Maximum heading level (1-6)
        #[arg(long, default_value = "6")]
        max_heading: u8,

        #[command(flatten)]
        segment: SegmentArgs,
    },

    /// Show segmentation statistics
    Info {
        /// Input document (editor JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        segment: SegmentArgs,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args)]
struct SegmentArgs {
    /// Overflow strategy for long sections
    #[arg(long, value_enum, default_value = "weight")]
    strategy: Strategy,

    /// Weight budget per slide
    #[arg(long, env = "SLIDECUT_MAX_WEIGHT")]
    max_weight: Option<f64>,

    /// Block cap per slide (blocks strategy)
    #[arg(long, env = "SLIDECUT_MAX_BLOCKS")]
    max_blocks: Option<usize>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Greedy packing by estimated visual weight
    Weight,
    /// Fixed block count with heading-aware breaks
    Blocks,
}

impl From<Strategy> for OverflowStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Weight => OverflowStrategy::Weight,
            Strategy::Blocks => OverflowStrategy::BlockCount,
        }
    }
}

impl SegmentArgs {
    fn to_options(&self) -> SegmentOptions {
        let mut options = SegmentOptions::new().with_overflow(self.strategy.into());
        if let Some(weight) = self.max_weight {
            options = options.with_max_weight(weight);
        }
        if let Some(blocks) = self.max_blocks {
            options = options.with_max_blocks(blocks);
        }
        options
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Slides {
            input,
            output,
            compact,
            segment,
        }) => cmd_slides(&input, output.as_deref(), compact, &segment),
        Some(Commands::Html {
            input,
            output,
            no_classes,
            skip_images,
            max_heading,
            segment,
        }) => cmd_html(
            &input,
            output.as_deref(),
            !no_classes,
            skip_images,
            max_heading,
            &segment,
        ),
        Some(Commands::Info { input, segment }) => cmd_info(&input, &segment),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: print slides if input is provided
            if let Some(input) = cli.input {
                let segment = SegmentArgs {
                    strategy: Strategy::Weight,
                    max_weight: None,
                    max_blocks: None,
                };
                cmd_slides(&input, None, false, &segment)
            } else {
                println!("{}", "Usage: slidecut <FILE>".yellow());
                println!("       slidecut --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_deck(input: &Path, generator: Slidecut) -> Result<DeckResult, Box<dyn std::error::Error>> {
    let doc = Document::from_file(input)?;
    let deck = generator.try_generate(&doc)?;
    log::info!("{}: {} slides", input.display(), deck.slide_count());
    Ok(deck)
}

fn write_output(output: Option<&Path>, text: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }
    Ok(())
}

fn cmd_slides(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    segment: &SegmentArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let generator = Slidecut::new().with_segment_options(segment.to_options());
    let deck = load_deck(input, generator)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = slidecut::render::to_json(&deck.slides, format)?;
    write_output(output, &json)
}

fn cmd_html(
    input: &Path,
    output: Option<&Path>,
    classes: bool,
    skip_images: bool,
    max_heading: u8,
    segment: &SegmentArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let render_options = RenderOptions::new()
        .with_classes(classes)
        .with_max_heading(max_heading);
    let mut generator = Slidecut::new()
        .with_segment_options(segment.to_options())
        .with_render_options(render_options);
    if skip_images {
        generator = generator.with_visitor(SkipImagesVisitor);
    }
    let deck = load_deck(input, generator)?;

    let title = input.file_stem().unwrap_or_default().to_string_lossy();
    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str(&format!("<title>{}</title>\n", escape_html(&title)));
    page.push_str("</head>\n<body>\n");
    for (index, slide) in deck.slides.iter().enumerate() {
        page.push_str(&slide_section(index, slide)?);
        page.push('\n');
    }
    page.push_str("</body>\n</html>\n");

    write_output(output, &page)
}

/// Wrap one slide in a presentation section.
fn slide_section(index: usize, slide: &SlideContent) -> Result<String, Box<dyn std::error::Error>> {
    let section = match slide {
        SlideContent::Html { content } => format!(
            "<section class=\"bn-presentation-slide\" data-index=\"{}\">{}</section>",
            index, content
        ),
        SlideContent::Media {
            kind,
            title,
            payload,
        } => {
            // Keep the payload from closing the script element early.
            let payload = serde_json::to_string(payload)?.replace("</", "<\\/");
            format!(
                "<section class=\"bn-presentation-slide\" data-index=\"{}\" data-media=\"{}\">\
                 <h2>{}</h2><script type=\"application/json\">{}</script></section>",
                index,
                kind,
                escape_html(title),
                payload
            )
        }
    };
    Ok(section)
}

fn cmd_info(input: &Path, segment: &SegmentArgs) -> Result<(), Box<dyn std::error::Error>> {
    let generator = Slidecut::new().with_segment_options(segment.to_options());
    let deck = load_deck(input, generator)?;
    let stats = &deck.stats;

    println!("{}", "Deck Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Slides".bold(), stats.slide_count);
    println!("{}: {}", "HTML slides".bold(), stats.html_slides);
    println!("{}: {}", "Media slides".bold(), stats.media_slides);

    println!();
    println!("{}", "Segmentation".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Blocks".bold(), stats.blocks_collected);
    println!("{}: {}", "Trimmed".bold(), stats.blocks_trimmed);
    println!("{}: {}", "Separators".bold(), stats.separator_count);
    println!("{}: {}", "Overflow splits".bold(), stats.overflow_splits);

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "List items".bold(), stats.list_item_count);
    println!("{}: {}", "Code blocks".bold(), stats.code_block_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Images".bold(), stats.image_count);
    if stats.omitted_blocks > 0 {
        println!(
            "{}: {}",
            "Omitted".bold().yellow(),
            stats.omitted_blocks
        );
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "slidecut".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document-to-slides segmentation tool");
    println!();
    println!("License: MIT");
}
