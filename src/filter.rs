//! # Fingering Filter Pipeline
//!
//! Turns the raw search pool into practical fingerings.
//!
//! ## Stages (in order)
//! 1. **Bass rule** - Mute every string below the lowest root occurrence, then
//!    drop chains left with fewer than `min_sounding_strings` strings.
//! 2. **Finger budget** - Drop chains needing more than `max_fingers` fingers
//!    (see [`FingeringChain::required_fingers`]).
//! 3. **Tone coverage** - Keep chains that sound as many distinct pitch classes
//!    as tones were requested.
//! 4. **Deduplication** - Muting in stage 1 makes different raw chains
//!    identical; keep the first of each.
//!
//! Stages only mute strings or drop chains. They never fail.

use crate::chord::ChordToneSet;
use crate::config::FinderConfig;
use crate::fretboard::STRING_COUNT;
use crate::tone::PitchClass;
use crate::types::FingeringChain;
use std::collections::HashSet;
use tracing::debug;

/// Mute strings from 6 upward until one sounds `root`.
///
/// Returns the number of strings still sounding.
pub fn mute_below_root(chain: &mut FingeringChain, root: PitchClass) -> usize {
    let mut sounding = STRING_COUNT;
    for string in (1..=STRING_COUNT as u8).rev() {
        let is_root = chain
            .string(string)
            .and_then(|s| s.tone)
            .is_some_and(|tone| tone.pitch_class() == root);
        if is_root {
            break;
        }
        chain.mute(string);
        sounding -= 1;
    }
    sounding
}

pub fn retain_root_in_bass(
    chains: Vec<FingeringChain>,
    root: PitchClass,
    min_sounding_strings: usize,
) -> Vec<FingeringChain> {
    chains
        .into_iter()
        .filter_map(|mut chain| {
            let sounding = mute_below_root(&mut chain, root);
            (sounding >= min_sounding_strings).then_some(chain)
        })
        .collect()
}

pub fn retain_playable(chains: Vec<FingeringChain>, max_fingers: usize) -> Vec<FingeringChain> {
    chains
        .into_iter()
        .filter(|chain| chain.required_fingers() <= max_fingers)
        .collect()
}

pub fn retain_complete(chains: Vec<FingeringChain>, tone_count: usize) -> Vec<FingeringChain> {
    chains
        .into_iter()
        .filter(|chain| chain.distinct_pitch_count() == tone_count)
        .collect()
}

/// Drop structurally identical chains, keeping first occurrences in order.
pub fn dedup_chains(chains: Vec<FingeringChain>) -> Vec<FingeringChain> {
    let mut seen = HashSet::new();
    chains
        .into_iter()
        .filter(|chain| seen.insert(chain.clone()))
        .collect()
}

/// Run all four stages over the raw pool of one query.
pub fn apply(
    chains: Vec<FingeringChain>,
    tones: &ChordToneSet,
    config: &FinderConfig,
) -> Vec<FingeringChain> {
    let raw = chains.len();
    let chains = retain_root_in_bass(
        chains,
        tones.root_pitch(),
        usize::from(config.min_sounding_strings),
    );
    let after_bass = chains.len();
    let chains = retain_playable(chains, usize::from(config.max_fingers));
    let after_fingers = chains.len();
    let chains = retain_complete(chains, tones.len());
    let after_coverage = chains.len();
    let chains = dedup_chains(chains);

    debug!(
        raw,
        after_bass,
        after_fingers,
        after_coverage,
        accepted = chains.len(),
        "filtered fingerings for {}",
        tones
    );
    chains
}
