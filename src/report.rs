//! Statistics and coverage reports.
//!
//! Everything here is derived data: the indexer loads catalogs, this
//! module counts them. Reports serialize with `serde` for `--format json`
//! and render as aligned text for terminals.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Serialize;

use crate::catalog::{
    CatalogSet,
    MessageKey,
};
use crate::config::Settings;
use crate::input::CatalogFile;

/// Message counts for one context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextStats {
    pub name: String,
    pub finished: usize,
    pub unfinished: usize,
    pub obsolete: usize,
}

/// Statistics for one catalog file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub file: PathBuf,
    pub locale: Option<String>,
    /// Per-context counts, sorted by context name.
    pub contexts: Vec<ContextStats>,
    pub finished: usize,
    pub unfinished: usize,
    pub obsolete: usize,
    /// Finished share of the live messages (0-100). Obsolete-class
    /// entries are tracked separately and do not count against it.
    pub coverage_percent: f64,
}

impl CatalogStats {
    /// Counts the messages of one loaded catalog.
    #[must_use]
    pub fn measure(file: &CatalogFile) -> Self {
        let mut contexts: Vec<ContextStats> = file
            .catalog
            .contexts
            .iter()
            .map(|context| {
                let mut stats = ContextStats {
                    name: context.name.clone(),
                    finished: 0,
                    unfinished: 0,
                    obsolete: 0,
                };
                for message in &context.messages {
                    if message.is_obsolete() {
                        stats.obsolete += 1;
                    } else if message.is_translated() {
                        stats.finished += 1;
                    } else {
                        stats.unfinished += 1;
                    }
                }
                stats
            })
            .collect();
        contexts.sort_by(|a, b| a.name.cmp(&b.name));

        let finished = contexts.iter().map(|c| c.finished).sum();
        let unfinished = contexts.iter().map(|c| c.unfinished).sum();
        let obsolete = contexts.iter().map(|c| c.obsolete).sum();

        Self {
            file: file.path.clone(),
            locale: file.locale().map(String::from),
            contexts,
            finished,
            unfinished,
            obsolete,
            coverage_percent: percent(finished, finished + unfinished),
        }
    }
}

/// Coverage of every locale against the union of message identities.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReport {
    /// Distinct live message identities across all locales.
    pub total_messages: usize,
    /// Per-locale coverage, in locale order.
    pub locales: Vec<LocaleCoverage>,
}

/// How one locale covers the union of message identities.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleCoverage {
    pub locale: String,
    /// Identities with a finished translation here.
    pub translated: usize,
    /// Identities present here but still awaiting translation.
    pub unfinished: Vec<String>,
    /// Identities absent from this locale's catalog.
    pub missing: Vec<String>,
    /// Translated share of the identity union (0-100).
    pub coverage_percent: f64,
}

/// Measures every locale of a set against the identity union.
#[must_use]
pub fn coverage_report(set: &CatalogSet) -> CoverageReport {
    let identities = set.identities();
    let total = identities.len();

    let locales = set
        .iter()
        .map(|(locale, catalog)| {
            let mut translated = BTreeSet::new();
            let mut unfinished = BTreeSet::new();
            for (context, message) in catalog.messages() {
                if message.is_obsolete() {
                    continue;
                }
                let key = MessageKey {
                    context: context.name.clone(),
                    source: message.source.clone(),
                    comment: message.comment.clone(),
                };
                if message.is_translated() {
                    translated.insert(key);
                } else {
                    unfinished.insert(key);
                }
            }
            // A duplicate entry that is finished in one copy counts as finished
            let unfinished: Vec<String> = unfinished
                .difference(&translated)
                .map(ToString::to_string)
                .collect();
            let missing: Vec<String> =
                set.missing_from(locale).iter().map(ToString::to_string).collect();

            LocaleCoverage {
                locale: locale.to_string(),
                translated: translated.len(),
                unfinished,
                missing,
                coverage_percent: percent(translated.len(), total),
            }
        })
        .collect();

    CoverageReport { total_messages: total, locales }
}

/// The full output of a `stats` run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub catalogs: Vec<CatalogStats>,
    /// Present when catalogs for more than one locale were loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<CoverageReport>,
}

impl StatsReport {
    /// Builds the report for one indexing run.
    #[must_use]
    pub fn collect(files: &[CatalogFile]) -> Self {
        let catalogs = files.iter().map(CatalogStats::measure).collect();

        let mut set = CatalogSet::new();
        for file in files {
            if let Some(locale) = file.locale() {
                if set.insert(locale, file.catalog.clone()).is_some() {
                    tracing::debug!("Several catalogs for locale {locale}, keeping the last");
                }
            }
        }
        let coverage = (set.len() > 1).then(|| coverage_report(&set));

        Self { catalogs, coverage }
    }

    /// Catalogs of required locales that fall short of the coverage gate.
    ///
    /// The gate is `coverage.minimum` from the settings, or 100 when
    /// unset. Catalogs whose locale is unknown are always gated.
    #[must_use]
    pub fn below_threshold(&self, settings: &Settings) -> Vec<&CatalogStats> {
        let minimum = settings.coverage_minimum();
        self.catalogs
            .iter()
            .filter(|stats| {
                stats
                    .locale
                    .as_deref()
                    .is_none_or(|locale| settings.is_required_language(locale))
                    && stats.coverage_percent < minimum
            })
            .collect()
    }

    /// Renders the report as aligned text.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        for stats in &self.catalogs {
            if !out.is_empty() {
                out.push('\n');
            }
            render_catalog_stats(&mut out, stats);
        }

        if let Some(coverage) = &self.coverage {
            out.push('\n');
            render_coverage(&mut out, coverage);
        }

        out
    }
}

/// One per-file table with a column-aligned context breakdown.
fn render_catalog_stats(out: &mut String, stats: &CatalogStats) {
    match &stats.locale {
        Some(locale) => {
            out.push_str(&format!("{} ({locale})\n", stats.file.display()));
        }
        None => out.push_str(&format!("{}\n", stats.file.display())),
    }

    let name_width = stats
        .contexts
        .iter()
        .map(|c| c.name.len())
        .chain(["Context".len(), "Total".len()])
        .max()
        .unwrap_or(0);

    out.push_str(&format!(
        "  {:<name_width$}  {:>8}  {:>10}  {:>8}\n",
        "Context", "Finished", "Unfinished", "Obsolete"
    ));
    for context in &stats.contexts {
        out.push_str(&format!(
            "  {:<name_width$}  {:>8}  {:>10}  {:>8}\n",
            context.name, context.finished, context.unfinished, context.obsolete
        ));
    }
    out.push_str(&format!(
        "  {:<name_width$}  {:>8}  {:>10}  {:>8}  ({:.1}% finished)\n",
        "Total", stats.finished, stats.unfinished, stats.obsolete, stats.coverage_percent
    ));
}

/// The cross-locale block, listing unfinished and missing keys per locale.
fn render_coverage(out: &mut String, coverage: &CoverageReport) {
    out.push_str(&format!(
        "Coverage across {} locales, {} distinct messages\n",
        coverage.locales.len(),
        coverage.total_messages
    ));

    let locale_width =
        coverage.locales.iter().map(|l| l.locale.len()).max().unwrap_or(0);

    for locale in &coverage.locales {
        out.push_str(&format!(
            "  {:<locale_width$}  {:>5.1}%  ({} translated, {} unfinished, {} missing)\n",
            locale.locale,
            locale.coverage_percent,
            locale.translated,
            locale.unfinished.len(),
            locale.missing.len()
        ));
        for key in &locale.unfinished {
            out.push_str(&format!("    unfinished  {key}\n"));
        }
        for key in &locale.missing {
            out.push_str(&format!("    missing     {key}\n"));
        }
    }
}

/// `numerator / denominator` as a percentage; an empty denominator counts
/// as complete.
fn percent(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        100.0
    } else {
        (numerator as f64 / denominator as f64) * 100.0
    }
}
