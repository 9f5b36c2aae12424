use crate::config::{ImageConfig, Settings};
use crate::feed::parse_feed;
use crate::item::FeedItem;
use crate::processor::{extractor::extract_image_urls, ImageProcessor, ProcessReport};
use crate::{Error, Result};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Options for the `process` command
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    pub config: Option<PathBuf>,
    pub ignore: Vec<String>,
    pub override_image: Option<bool>,
    pub pretty: bool,
}

/// Assign images to the entries of a feed file and print them as JSON
pub fn process(settings: &Settings, feed: &Path, options: ProcessOptions) -> Result<()> {
    let mut settings = settings.clone();
    if options.config.is_some() {
        settings.config_path = options.config.clone();
    }

    let processor = build_processor(&settings.image_config()?, &options);
    let content = read_input(feed)?;
    let (items, report) = process_feed(&processor, &content)?;

    info!(
        "{}: {} images assigned, {} kept, {} without a usable image",
        feed.display(),
        report.assigned,
        report.skipped,
        report.unchanged
    );

    let output = render_items(&items, options.pretty)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.write_all(b"\n")?;
    stdout.flush()?;

    Ok(())
}

/// Print the image candidates of an HTML document, one per line
pub fn extract(html: &Path) -> Result<()> {
    let content = read_input(html)?;

    let mut stdout = io::stdout().lock();
    for url in extract_image_urls(&content) {
        writeln!(stdout, "{url}")?;
    }
    stdout.flush()?;

    Ok(())
}

/// Load an image configuration file and report what it contains
pub fn validate(config: &Path) -> Result<()> {
    let image_config = ImageConfig::from_file(config)?;

    println!("✓ Valid image configuration: {}", config.display());
    println!("  Ignore patterns: {}", image_config.ignored_patterns.len());
    for pattern in &image_config.ignored_patterns {
        println!("    {pattern}");
    }
    println!("  Override image: {}", image_config.override_image);

    Ok(())
}

/// Combine file/environment configuration with command-line flags
pub fn build_processor(config: &ImageConfig, options: &ProcessOptions) -> ImageProcessor {
    let mut processor = ImageProcessor::from_config(config);
    for pattern in &options.ignore {
        processor.add_ignored_pattern(pattern);
    }
    if let Some(override_image) = options.override_image {
        processor.set_override_image(override_image);
    }
    processor
}

/// Parse a feed document and run the processor over its entries
pub fn process_feed(
    processor: &ImageProcessor,
    content: &str,
) -> Result<(Vec<FeedItem>, ProcessReport)> {
    let mut items = parse_feed(content)?;
    let report = processor.process(items.iter_mut())?;
    Ok((items, report))
}

pub fn render_items(items: &[FeedItem], pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(items)?
    } else {
        serde_json::to_string(items)?
    };
    Ok(json)
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content)?;
        return Ok(content);
    }

    if !path.is_file() {
        return Err(Error::Validation(format!(
            "File not found: {}",
            path.display()
        )));
    }

    Ok(std::fs::read_to_string(path)?)
}
