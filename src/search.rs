//! # Fingering Search Engine
//!
//! Exhaustive backtracking search for six-string fingerings of a chord-tone set.
//!
//! ## Windows
//! The hand is modeled as a window of consecutive frets. Every fret where any
//! requested tone sounds on any string anchors one window:
//!
//! ```text
//!   anchor 0  -> frets 0..=5   (open position, one fret wider)
//!   anchor n  -> frets n..=n+4
//! ```
//!
//! Windows whose high end passes [`MAX_FRET`] are skipped.
//!
//! ## Backtracking
//! Inside a window, strings are visited 1 to 6. On each string every tone is
//! tried in chord order, except the tone chosen on the previous string, at
//! its lowest fret inside the window. A placement is kept only if it is on
//! string 6 or the following strings can all be placed after it; otherwise
//! it is retracted. Kept placements live in an arena and point at their
//! predecessor by index, so chains sharing a prefix share its nodes.
//!
//! Every string-6 node that survives is walked back to string 1 to produce
//! one [`FingeringChain`]. The raw pool is handed to the `filter` module.
//!
//! ## Per-query state
//! [`SearchContext`] owns everything one query mutates. The [`Fretboard`] and
//! [`FinderConfig`] are only borrowed, so one board can serve many queries
//! at the same time.

use crate::chord::ChordToneSet;
use crate::config::FinderConfig;
use crate::fretboard::{Fretboard, MAX_FRET, STRING_COUNT};
use crate::tone::ScaleTone;
use crate::types::FingeringChain;
use std::collections::BTreeSet;
use tracing::{debug, trace};

const LAST_STRING: u8 = STRING_COUNT as u8;

/// Inclusive fret range covered by one hand position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FretWindow {
    pub low: u8,
    pub high: u8,
}

impl FretWindow {
    /// The window anchored at `start`, or `None` when it would pass [`MAX_FRET`].
    pub fn anchored_at(start: u8, config: &FinderConfig) -> Option<Self> {
        let span = if start == 0 {
            config.open_window_span
        } else {
            config.window_span
        };
        let high = start.checked_add(span)?;
        (high <= MAX_FRET).then_some(Self { low: start, high })
    }

    pub fn contains(&self, fret: u8) -> bool {
        (self.low..=self.high).contains(&fret)
    }
}

/// A tentative placement: `tone` indexes the query's tone list.
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    string: u8,
    fret: u8,
    tone: usize,
    parent: Option<usize>,
}

/// Working state for one query.
pub struct SearchContext<'a> {
    fretboard: &'a Fretboard,
    config: &'a FinderConfig,
    spellings: Vec<ScaleTone>,
    pool: Vec<FingeringChain>,
}

impl<'a> SearchContext<'a> {
    pub fn new(fretboard: &'a Fretboard, tones: &ChordToneSet, config: &'a FinderConfig) -> Self {
        Self {
            fretboard,
            config,
            spellings: tones.spellings(),
            pool: Vec::new(),
        }
    }

    /// Sorted, deduplicated frets where any tone sounds on any string.
    pub fn window_anchors(&self) -> Vec<u8> {
        let mut anchors = BTreeSet::new();
        for tone in &self.spellings {
            for string in 1..=LAST_STRING {
                anchors.extend(
                    self.fretboard
                        .find_frets(tone.pitch_class(), string, 0, MAX_FRET),
                );
            }
        }
        anchors.into_iter().collect()
    }

    /// Every complete chain the backtracking finds inside `window`.
    pub fn search_window(&self, window: FretWindow) -> Vec<FingeringChain> {
        let mut search = WindowSearch {
            fretboard: self.fretboard,
            spellings: &self.spellings,
            window,
            nodes: Vec::new(),
        };
        if !search.place(1, None, None) {
            return Vec::new();
        }
        search.into_chains()
    }

    /// Search every window and return the pooled, unfiltered chains.
    pub fn run(mut self) -> Vec<FingeringChain> {
        let anchors = self.window_anchors();
        trace!(?anchors, "window anchors");

        for start in anchors {
            let Some(window) = FretWindow::anchored_at(start, self.config) else {
                continue;
            };
            let chains = self.search_window(window);
            debug!(
                low = window.low,
                high = window.high,
                chains = chains.len(),
                "searched window"
            );
            self.pool.extend(chains);
        }
        self.pool
    }
}

struct WindowSearch<'s> {
    fretboard: &'s Fretboard,
    spellings: &'s [ScaleTone],
    window: FretWindow,
    nodes: Vec<SearchNode>,
}

impl WindowSearch<'_> {
    /// Try every allowed tone on `string`; true if at least one placement
    /// leads to a complete chain.
    fn place(&mut self, string: u8, previous_tone: Option<usize>, parent: Option<usize>) -> bool {
        let mut placed = false;

        for (tone, spelling) in self.spellings.iter().enumerate() {
            // Adjacent strings never repeat a tone
            if previous_tone == Some(tone) {
                continue;
            }
            let frets = self.fretboard.find_frets(
                spelling.pitch_class(),
                string,
                self.window.low,
                self.window.high,
            );
            let Some(&fret) = frets.first() else {
                continue;
            };

            let node = self.nodes.len();
            self.nodes.push(SearchNode {
                string,
                fret,
                tone,
                parent,
            });

            let accepted = string == LAST_STRING || self.place(string + 1, Some(tone), Some(node));
            if !accepted {
                self.nodes.truncate(node);
            }
            placed |= accepted;
        }

        placed
    }

    fn into_chains(self) -> Vec<FingeringChain> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.string == LAST_STRING)
            .map(|(leaf, _)| {
                let mut chain = FingeringChain::muted();
                let mut cursor = Some(leaf);
                while let Some(index) = cursor {
                    let node = self.nodes[index];
                    chain.set(node.string, node.fret, self.spellings[node.tone]);
                    cursor = node.parent;
                }
                chain
            })
            .collect()
    }
}

/// Raw chains for `tones` across all windows, before filtering.
pub fn search(fretboard: &Fretboard, tones: &ChordToneSet, config: &FinderConfig) -> Vec<FingeringChain> {
    SearchContext::new(fretboard, tones, config).run()
}
