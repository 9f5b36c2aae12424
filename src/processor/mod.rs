// Image processor
// Picks a representative image for feed items from the <img> tags in their content

pub mod extractor;
pub mod filter;

use crate::config::ImageConfig;
use crate::error::Result;
use crate::item::Item;
use extractor::extract_image_urls;
use filter::{validate_patterns, PatternSet};
use tracing::{debug, info};

/// Result of processing a single item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Item already had an image and override is off
    Skipped,
    /// Image was set to the contained URL
    Assigned(String),
    /// No acceptable image in the content, item left as it was
    Unchanged,
}

/// Counts for one batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessReport {
    pub assigned: usize,
    pub skipped: usize,
    pub unchanged: usize,
}

impl ProcessReport {
    pub fn total(&self) -> usize {
        self.assigned + self.skipped + self.unchanged
    }

    fn record(&mut self, outcome: &ProcessOutcome) {
        match outcome {
            ProcessOutcome::Assigned(_) => self.assigned += 1,
            ProcessOutcome::Skipped => self.skipped += 1,
            ProcessOutcome::Unchanged => self.unchanged += 1,
        }
    }
}

/// Assigns the first non-ignored `<img>` of an item's content as its image.
///
/// Configuration takes `&mut self` and processing takes `&self`, so a
/// processor cannot be reconfigured while a batch is running.
#[derive(Debug, Clone, Default)]
pub struct ImageProcessor {
    ignored_patterns: Vec<String>,
    override_image: bool,
}

impl ImageProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ImageConfig) -> Self {
        let mut processor = Self::new();
        processor.set_ignored_patterns(&config.ignored_patterns);
        processor.set_override_image(config.override_image);
        processor
    }

    pub fn with_ignored_patterns<I, P>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: ToString,
    {
        self.set_ignored_patterns(patterns);
        self
    }

    pub fn with_override_image(mut self, override_image: bool) -> Self {
        self.set_override_image(override_image);
        self
    }

    /// Replace the ignore list. Each entry goes through [`Self::add_ignored_pattern`].
    pub fn set_ignored_patterns<I, P>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = P>,
        P: ToString,
    {
        self.ignored_patterns.clear();
        for pattern in patterns {
            self.add_ignored_pattern(pattern);
        }
    }

    /// Append a pattern. It is not compiled until a URL is tested against it.
    pub fn add_ignored_pattern(&mut self, pattern: impl ToString) {
        self.ignored_patterns.push(pattern.to_string());
    }

    /// Ignore patterns in insertion order
    pub fn ignored_patterns(&self) -> &[String] {
        &self.ignored_patterns
    }

    pub fn set_override_image(&mut self, override_image: bool) {
        self.override_image = override_image;
    }

    pub fn override_image(&self) -> bool {
        self.override_image
    }

    /// Compile every ignore pattern now instead of at match time.
    pub fn validate_patterns(&self) -> Result<()> {
        validate_patterns(&self.ignored_patterns)
    }

    /// Process a batch of items in place.
    ///
    /// Any mutable iteration works, so keyed collections keep their keys:
    /// `process(map.values_mut())`. An invalid ignore pattern stops the batch
    /// with [`crate::Error::InvalidPattern`]; items handled before it keep
    /// their new image.
    pub fn process<'a, I, T>(&self, items: I) -> Result<ProcessReport>
    where
        I: IntoIterator<Item = &'a mut T>,
        T: Item + ?Sized + 'a,
    {
        let mut patterns = PatternSet::new(&self.ignored_patterns);
        let mut report = ProcessReport::default();

        for item in items {
            let outcome = self.apply(item, &mut patterns)?;
            report.record(&outcome);
        }

        info!(
            "Processed {} items: {} assigned, {} skipped, {} unchanged",
            report.total(),
            report.assigned,
            report.skipped,
            report.unchanged
        );

        Ok(report)
    }

    /// Process a single item.
    pub fn process_item<T: Item + ?Sized>(&self, item: &mut T) -> Result<ProcessOutcome> {
        let mut patterns = PatternSet::new(&self.ignored_patterns);
        self.apply(item, &mut patterns)
    }

    fn apply<T: Item + ?Sized>(
        &self,
        item: &mut T,
        patterns: &mut PatternSet<'_>,
    ) -> Result<ProcessOutcome> {
        if item.has_image() && !self.override_image {
            debug!("Item already has an image, skipping");
            return Ok(ProcessOutcome::Skipped);
        }

        let candidates = extract_image_urls(item.content().unwrap_or_default());

        for candidate in candidates {
            if patterns.is_ignored(&candidate)? {
                debug!("Ignoring image {}", candidate);
                continue;
            }

            debug!("Assigning image {}", candidate);
            item.set_image(candidate.clone());
            return Ok(ProcessOutcome::Assigned(candidate));
        }

        Ok(ProcessOutcome::Unchanged)
    }
}
