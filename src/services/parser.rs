// src/services/parser.rs

//! Search-result page parsing.
//!
//! The site has no public API; results are scraped out of the search
//! page's markup. Each `li.back_darkish` entry yields one candidate.
//! The statistics block carries no per-category markup: cells arrive as
//! (label, value) pairs in document order, and the label text decides
//! which category the following value belongs to.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::SearchCandidate;
use crate::utils::duration::parse_duration;
use crate::utils::resolve_url;

/// Prefix of a result anchor's href, ahead of the numeric game id.
const GAME_HREF_PREFIX: &str = "game?id=";

/// Pre-parsed CSS selectors for the search-result markup.
struct Selectors {
    entry: Selector,
    anchor: Selector,
    image: Selector,
    details: Selector,
    tidbit: Selector,
}

impl Selectors {
    fn new() -> Result<Self> {
        Ok(Self {
            entry: parse_selector("li.back_darkish")?,
            anchor: parse_selector(".search_list_image a")?,
            image: parse_selector(".search_list_image a img")?,
            details: parse_selector(".search_list_details_block")?,
            tidbit: parse_selector(".search_list_tidbit")?,
        })
    }
}

/// Parser for search-result pages.
pub struct SearchParser {
    base_url: Url,
    selectors: Selectors,
}

impl SearchParser {
    /// Create a parser that resolves entry links against `base_url`.
    pub fn new(base_url: Url) -> Result<Self> {
        Ok(Self {
            base_url,
            selectors: Selectors::new()?,
        })
    }

    /// Parse a search-result page into candidates.
    ///
    /// Malformed entries are logged and skipped; one broken entry must
    /// not discard the rest of the page. Empty input yields an empty
    /// list.
    pub fn parse(&self, markup: &str) -> Vec<SearchCandidate> {
        if markup.is_empty() {
            return Vec::new();
        }

        let document = Html::parse_document(markup);
        document
            .select(&self.selectors.entry)
            .filter_map(|entry| match self.parse_entry(entry) {
                Ok(candidate) => Some(candidate),
                Err(error) => {
                    log::warn!("Skipping malformed search entry: {}", error);
                    None
                }
            })
            .collect()
    }

    /// Extract one candidate from a search-result entry.
    fn parse_entry(&self, entry: ElementRef<'_>) -> Result<SearchCandidate> {
        let anchor = entry
            .select(&self.selectors.anchor)
            .next()
            .ok_or_else(|| AppError::candidate("search entry", "missing title anchor"))?;
        let name = anchor
            .value()
            .attr("title")
            .ok_or_else(|| AppError::candidate("search entry", "anchor has no title attribute"))?
            .to_string();
        let href = anchor
            .value()
            .attr("href")
            .ok_or_else(|| AppError::candidate(name.as_str(), "anchor has no href attribute"))?;
        let game_id = parse_game_id(&name, href)?;

        let image_url = entry
            .select(&self.selectors.image)
            .next()
            .and_then(|img| img.value().attr("src"))
            .ok_or_else(|| AppError::candidate(name.as_str(), "missing thumbnail image"))?
            .to_string();

        let mut candidate = SearchCandidate {
            detail_url: resolve_url(&self.base_url, href),
            name,
            game_id,
            image_url,
            ..SearchCandidate::default()
        };

        let details = entry
            .select(&self.selectors.details)
            .next()
            .ok_or_else(|| {
                AppError::candidate(candidate.name.as_str(), "missing details block")
            })?;

        let mut decoder = StatDecoder::new();
        for cell in self.stat_cells(details) {
            let Some(field) = decoder.feed(&cell) else {
                continue;
            };
            match parse_duration(&cell) {
                Ok(seconds) => field.set(&mut candidate, seconds),
                Err(error) => {
                    // Unreadable figure means no data, not a dead entry.
                    log::debug!(
                        "Unparseable duration '{}' for '{}': {}",
                        cell,
                        candidate.name,
                        error
                    );
                }
            }
        }

        Ok(candidate)
    }

    /// Collect the statistics cells of an entry in document order.
    ///
    /// Some listings omit the tidbit class; those fall back to the
    /// details block's direct child elements.
    fn stat_cells(&self, block: ElementRef<'_>) -> Vec<String> {
        let cells: Vec<String> = block
            .select(&self.selectors.tidbit)
            .map(|el| el.inner_html())
            .collect();
        if !cells.is_empty() {
            return cells;
        }

        block
            .children()
            .filter_map(ElementRef::wrap)
            .map(|el| el.inner_html())
            .collect()
    }
}

/// Which duration field of a candidate a value cell feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatField {
    MainStory,
    Solo,
    MainExtra,
    CoOp,
    Completionist,
    Vs,
}

impl StatField {
    fn set(self, candidate: &mut SearchCandidate, seconds: u64) {
        match self {
            StatField::MainStory => candidate.main_story_seconds = seconds,
            StatField::Solo => candidate.solo_seconds = seconds,
            StatField::MainExtra => candidate.main_extra_seconds = seconds,
            StatField::CoOp => candidate.co_op_seconds = seconds,
            StatField::Completionist => candidate.completionist_seconds = seconds,
            StatField::Vs => candidate.vs_seconds = seconds,
        }
    }
}

/// Decoder for the ordered cells of a statistics block.
///
/// Even positions are labels, odd positions the matching values. The
/// label names the category: single-player listings show "Main Story" /
/// "Main + Extra" / "Completionist", multiplayer listings show other
/// labels in the same slots, so the label must be inspected before the
/// value that follows it can be routed.
struct StatDecoder {
    position: usize,
    field: Option<StatField>,
}

impl StatDecoder {
    fn new() -> Self {
        Self {
            position: 0,
            field: None,
        }
    }

    /// Feed the next cell in document order.
    ///
    /// Returns the field to populate when the cell is a non-empty value
    /// cell whose slot carries a statistic.
    fn feed(&mut self, cell: &str) -> Option<StatField> {
        let position = self.position;
        self.position += 1;

        if position % 2 == 0 {
            self.field = Self::route(position / 2, cell);
            None
        } else if cell.is_empty() {
            None
        } else {
            self.field.take()
        }
    }

    /// Pick the field a value slot feeds from the label ahead of it.
    ///
    /// Labels other than the known single-player set route to the
    /// multiplayer member of the pair; slots past the third pair carry
    /// no statistic.
    fn route(pair: usize, label: &str) -> Option<StatField> {
        match pair {
            0 => Some(if label == "Main Story" {
                StatField::MainStory
            } else {
                StatField::Solo
            }),
            1 => Some(if label == "Main + Extra" {
                StatField::MainExtra
            } else {
                StatField::CoOp
            }),
            2 => Some(if label == "Completionist" {
                StatField::Completionist
            } else {
                StatField::Vs
            }),
            _ => None,
        }
    }
}

/// Parse the numeric game id out of a result anchor's href.
fn parse_game_id(name: &str, href: &str) -> Result<u32> {
    let raw = href.strip_prefix(GAME_HREF_PREFIX).unwrap_or(href);
    raw.parse()
        .map_err(|e| AppError::candidate(name, format!("bad game id in href '{href}': {e}")))
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
