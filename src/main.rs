#![forbid(unsafe_code)]
//! # Sentiment Analysis Pro CLI
//!
//! Command-line front end for the `sentiment_pro` crate. Analyzes one text
//! at a time: sentiment scores with an emoji reaction, a polarity meter,
//! the top emoji and their distribution, and a word cloud.
//!
//! ## Features
//! - Text from the command line, a file, or the paragraphs of a web page.
//! - Word cloud written as PNG.
//! - Export in txt, csv, tsv or json.
//! - Optional extra stopword list and word-cloud font.
//!
//! ## Example
//! ```bash
//! cargo run --release -- analyze "I love this amazing app! 😊" --wordcloud cloud.png
//! cargo run --release -- analyze --url https://example.com --export-format json
//! ```
//!
//! See `--help` for all available options.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use log::error;
use sentiment_pro::{
    AnalysisError, AnalysisOptions, EmojiMatch, ExportFormat, Resources, TextFetcher,
    WordCloudOptions, analyze_text_with, emojize, export_report, format_summary,
};

const DEFAULT_TEXT: &str = "I love this amazing app! 😊";

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    menu: Menu,
}

#[derive(Subcommand)]
enum Menu {
    /// Analyze the sentiment, word cloud and emoji of a text
    #[command(alias = "sentiment-analysis")]
    Analyze(AnalyzeArgs),
    /// What this tool does
    About,
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Text to analyze [default: "I love this amazing app! 😊"]
    #[arg(conflicts_with_all = ["url", "file"])]
    text: Option<String>,

    /// Fetch the text from the <p> elements of this URL instead
    #[arg(long, conflicts_with = "file")]
    url: Option<String>,

    /// Read the text from this file instead
    #[arg(long)]
    file: Option<PathBuf>,

    /// Optional path to additional stopword file (.txt, one word per line)
    #[arg(long)]
    stopwords: Option<PathBuf>,

    /// TrueType/OpenType font for the word cloud (default: embedded DejaVu Sans)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Match emoji per character or per grapheme cluster (flags, ZWJ sequences)
    #[arg(long, value_enum, default_value_t = EmojiMatch::Char)]
    emoji_match: EmojiMatch,

    /// Number of top emoji to list
    #[arg(long, default_value_t = 5)]
    top: usize,

    /// Write the word cloud as PNG to this path
    #[arg(long)]
    wordcloud: Option<PathBuf>,

    /// Word cloud width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Word cloud height in pixels
    #[arg(long, default_value_t = 400)]
    height: u32,

    /// Smallest font size used in the word cloud
    #[arg(long, default_value_t = 10.0)]
    min_font: f32,

    /// Maximum number of terms in the word cloud
    #[arg(long, default_value_t = 200)]
    max_words: usize,

    /// Export results (txt, csv, tsv, json) into the current directory
    #[arg(long)]
    export_format: Option<ExportFormat>,

    /// Timeout for --url requests, in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.menu {
        Menu::Analyze(args) => {
            if let Err(code) = run_analyze(args) {
                process::exit(code);
            }
        }
        Menu::About => print_about(),
    }
}

fn run_analyze(args: AnalyzeArgs) -> Result<(), i32> {
    let mut resources = Resources::load(args.stopwords.as_deref()).map_err(|e| {
        error!("Error: {}", e);
        1
    })?;
    if let Some(font) = &args.font {
        resources = resources.with_font_file(font).map_err(|e| {
            error!("Error: {}", e);
            1
        })?;
    }

    let text = if let Some(url) = &args.url {
        let fetcher = TextFetcher::http(Duration::from_secs(args.timeout)).map_err(|e| {
            error!("Error: {}", e);
            1
        })?;
        // failures are logged by the fetcher and leave the text empty
        fetcher.fetch(url).text
    } else if let Some(path) = &args.file {
        fs::read_to_string(path).map_err(|e| {
            error!("Error reading {}: {}", path.display(), e);
            1
        })?
    } else {
        args.text.clone().unwrap_or_else(|| DEFAULT_TEXT.to_string())
    };

    let options = AnalysisOptions {
        wordcloud: WordCloudOptions {
            width: args.width,
            height: args.height,
            min_font_size: args.min_font,
            max_words: args.max_words,
            ..Default::default()
        },
        emoji_match: args.emoji_match,
        top_emoji: args.top,
    };

    let report = match analyze_text_with(&text, &resources, &options) {
        Ok(report) => report,
        Err(AnalysisError::InvalidInput) => {
            eprintln!("Warning: {}", AnalysisError::InvalidInput);
            return Err(2);
        }
        Err(e) => {
            error!("Error: {}", e);
            return Err(1);
        }
    };

    println!("{}", format_summary(&report));

    if let Some(path) = &args.wordcloud {
        match &report.wordcloud {
            Some(cloud) => {
                cloud.save_png(path).map_err(|e| {
                    error!("Error: {}", e);
                    1
                })?;
                println!("Word cloud saved to {}", path.display());
            }
            None => println!("Nothing to draw, no word cloud written"),
        }
    }

    if let Some(format) = args.export_format {
        let written = export_report(&report, "analysis", format, Path::new(".")).map_err(|e| {
            error!("Error: {}", e);
            1
        })?;
        for path in written {
            println!("Exported {}", path.display());
        }
    }
    Ok(())
}

fn print_about() {
    println!("📝 About Sentiment Analysis Pro");
    println!();
    println!("This tool provides:");
    println!("- Sentiment analysis with emoji reactions");
    println!("- A polarity meter on a -1 to +1 scale");
    println!("- Word clouds of the terms that remain after stopword removal");
    println!("- Emoji frequency and distribution");
    println!("- Paragraph text extraction from web pages");
    println!();
    println!("{}", emojize("Built with :heart: in Rust"));
    println!("For educational purposes - demonstrating NLP techniques");
}
