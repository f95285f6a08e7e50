//! # Chord Diagrams
//!
//! Layout data for drawing one fingering as a chord box, plus a plain-text
//! rendering for terminals.
//!
//! ## Layout
//! A diagram shows [`DIAGRAM_FRETS`] fret rows. When every sounding fret fits
//! in that range the box starts at the nut (`base_fret == 0`) and a fret's
//! row is the fret number. Otherwise the box starts at the lowest sounding
//! fret, which becomes row 1.
//!
//! - Muted strings get an `x` above the box, open strings an `o`.
//! - Two or more strings pressed at the lowest (non-open) fret form a barre,
//!   drawn from string 1 up to the highest of those strings.
//! - A fret label names the lowest sounding fret whenever it is not open.
//! - Each sounding string is labelled with its note letter, spelled the way
//!   its tone was written (`b3` shows `Eb`, `#2` shows `D#`).
//!
//! ## Example
//! ```rust
//! use fretchord::{find_chord, ChordDiagram, StringMarker};
//!
//! let report = find_chord(&["1", "3", "5"])?;
//! let chain = report.fingerings.iter().find(|c| c.to_string() == "x32010").unwrap();
//! let diagram = ChordDiagram::from_chain(chain);
//! assert_eq!(diagram.base_fret, 0);
//! assert_eq!(diagram.markers[5], StringMarker::Muted);
//! assert_eq!(diagram.markers[4], StringMarker::Finger { row: 3 });
//! # Ok::<(), fretchord::ChordError>(())
//! ```

use crate::fretboard::STRING_COUNT;
use crate::types::FingeringChain;
use serde::Serialize;

/// Fret rows shown by a diagram.
pub const DIAGRAM_FRETS: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum StringMarker {
    Muted,
    Open,
    /// Finger dot on a diagram row (1-based)
    Finger { row: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Barre {
    pub row: u8,
    /// Highest string covered; the barre always reaches string 1.
    pub to_string: u8,
}

/// Everything a renderer needs to draw one fingering.
///
/// Per-string arrays are indexed by string number minus one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordDiagram {
    pub markers: [StringMarker; STRING_COUNT],
    pub labels: [Option<&'static str>; STRING_COUNT],
    pub base_fret: u8,
    pub barre: Option<Barre>,
    pub fret_label: Option<u8>,
}

impl ChordDiagram {
    pub fn from_chain(chain: &FingeringChain) -> Self {
        let min_fret = chain.min_fret().unwrap_or(0);
        let max_fret = chain.max_fret().unwrap_or(0);
        let base_fret = if max_fret <= DIAGRAM_FRETS { 0 } else { min_fret };
        let row_of = |fret: u8| {
            if base_fret == 0 {
                fret
            } else {
                fret - base_fret + 1
            }
        };

        let mut markers = [StringMarker::Muted; STRING_COUNT];
        let mut labels = [None; STRING_COUNT];
        for (i, string) in chain.strings().iter().enumerate() {
            markers[i] = match string.fret {
                None => StringMarker::Muted,
                Some(0) => StringMarker::Open,
                Some(fret) => StringMarker::Finger { row: row_of(fret) },
            };
            labels[i] = string
                .fret
                .and(string.tone)
                .map(|tone| tone.letter_name());
        }

        let barre = if min_fret > 0 {
            let covered: Vec<u8> = chain
                .sounding()
                .filter(|s| s.fret == Some(min_fret))
                .map(|s| s.string)
                .collect();
            (covered.len() > 1).then(|| Barre {
                row: row_of(min_fret),
                to_string: covered.iter().copied().max().unwrap_or(1),
            })
        } else {
            None
        };

        Self {
            markers,
            labels,
            base_fret,
            barre,
            fret_label: (min_fret > 0).then_some(min_fret),
        }
    }

    /// Rows to draw: [`DIAGRAM_FRETS`], or more for unusually wide shapes.
    pub fn rows(&self) -> u8 {
        self.markers
            .iter()
            .filter_map(|marker| match marker {
                StringMarker::Finger { row } => Some(*row),
                _ => None,
            })
            .max()
            .unwrap_or(0)
            .max(DIAGRAM_FRETS)
    }

    fn label_row(&self) -> Option<u8> {
        let fret = self.fret_label?;
        Some(if self.base_fret == 0 { fret } else { 1 })
    }

    fn cell(&self, index: usize, row: u8) -> &'static str {
        let string = index as u8 + 1;
        let fingered = self.markers[index] == StringMarker::Finger { row };
        let in_barre = self
            .barre
            .is_some_and(|barre| barre.row == row && string <= barre.to_string);
        match (fingered, in_barre) {
            (true, true) => "-o-",
            (true, false) => " o ",
            (false, true) => "---",
            (false, false) => " | ",
        }
    }

    /// Draw the diagram as text, string 6 on the left.
    ///
    /// ```text
    /// C
    ///  x        o     o
    /// ==================
    ///  |  |  |  |  o  |
    ///  |  |  o  |  |  |
    ///  |  o  |  |  |  |
    ///  |  |  |  |  |  |
    ///  |  |  |  |  |  |
    ///     C  E  G  C  E
    /// ```
    pub fn render_text(&self, title: &str) -> String {
        let columns: Vec<usize> = (0..STRING_COUNT).rev().collect();
        let mut lines = vec![title.to_string()];

        let header: String = columns
            .iter()
            .map(|&i| match self.markers[i] {
                StringMarker::Muted => " x ",
                StringMarker::Open => " o ",
                StringMarker::Finger { .. } => "   ",
            })
            .collect();
        lines.push(header);

        let edge = if self.base_fret == 0 { "===" } else { "---" };
        lines.push(edge.repeat(STRING_COUNT));

        let label_row = self.label_row();
        for row in 1..=self.rows() {
            let mut line: String = columns.iter().map(|&i| self.cell(i, row)).collect();
            if label_row == Some(row) {
                if let Some(fret) = self.fret_label {
                    line.push_str(&format!(" {}fr", fret));
                }
            }
            lines.push(line);
        }

        let labels: String = columns
            .iter()
            .map(|&i| format!("{:^3}", self.labels[i].unwrap_or("")))
            .collect();
        lines.push(labels);

        lines
            .iter()
            .map(|line| line.trim_end())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
