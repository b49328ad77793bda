mod change_translation;
mod linearise;
mod move_block;
mod permute;
mod resegment;
mod swap;

pub use self::change_translation::ChangePhraseTranslation;
pub use self::linearise::LinearisePhrases;
pub use self::move_block::MovePhrases;
pub use self::permute::PermutePhrases;
pub use self::resegment::Resegment;
pub use self::swap::SwapPhrases;

use crate::consts::MAX_SENTENCE_DRAW_TRIALS;
use crate::document::DocumentState;
use crate::rng::DecoderRng;
use crate::step::SearchStep;

/// A randomised proposal operator.
///
/// `propose` either returns a step whose modifications are non-empty or
/// `None` ("no proposal"): the sampled sentence was too short, a bounded
/// retry budget ran out, or the sampled change turned out to be the
/// identity. The dispatcher absorbs `None` by retrying.
pub trait Operation {
    /// Configuration key this operator is registered under.
    fn name(&self) -> &'static str;

    /// Human-readable tag including parameter values.
    fn description(&self) -> String;

    fn propose(&self, doc: &DocumentState, rng: &mut DecoderRng) -> Option<SearchStep>;
}

/// Length-weighted sentence draw, retried a bounded number of times until a
/// sentence with at least two phrases comes up. Keeps the expected per-call
/// cost O(1) on documents full of single-phrase sentences.
pub(crate) fn draw_multi_phrase_sentence(
    doc: &DocumentState,
    rng: &mut DecoderRng,
) -> Option<(usize, usize)> {
    let mut trials = 0;
    loop {
        let sentno = doc.draw_sentence(rng);
        let size = doc.segmentation(sentno).len();
        if size >= 2 {
            return Some((sentno, size));
        }
        if trials >= MAX_SENTENCE_DRAW_TRIALS {
            return None;
        }
        trials += 1;
    }
}

/// Longest common prefix and suffix between a replaced slice and its
/// replacement, so the emitted diff covers only the middle that actually
/// changed. Returns `None` when the slices are equal.
pub(crate) fn trim_common_affixes<T: PartialEq>(old: &[T], new: &[T]) -> Option<(usize, usize)> {
    let limit = old.len().min(new.len());

    let mut prefix = 0;
    while prefix < limit && old[prefix] == new[prefix] {
        prefix += 1;
    }
    if prefix == old.len() && prefix == new.len() {
        return None;
    }

    let mut suffix = 0;
    while suffix < limit - prefix && old[old.len() - 1 - suffix] == new[new.len() - 1 - suffix] {
        suffix += 1;
    }
    Some((prefix, suffix))
}
