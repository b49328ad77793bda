use super::{draw_multi_phrase_sentence, trim_common_affixes, Operation};
use crate::config::{validate_decay, Parameters};
use crate::consts::MAX_SHUFFLE_TRIALS;
use crate::document::DocumentState;
use crate::error::TfResult;
use crate::rng::DecoderRng;
use crate::step::SearchStep;
use tracing::debug;

/// Shuffles a geometrically-sized run of phrases into a uniform random
/// order.
pub struct PermutePhrases {
    decay: f64,
}

impl PermutePhrases {
    pub fn from_params(params: &Parameters) -> TfResult<Self> {
        let decay = validate_decay(
            params.get_float("phrase-permutation-decay")?,
            "phrase-permutation-decay",
        )?;
        Ok(Self { decay })
    }
}

impl Operation for PermutePhrases {
    fn name(&self) -> &'static str {
        "permute-phrases"
    }

    fn description(&self) -> String {
        format!("PermutePhrases(decay={})", self.decay)
    }

    fn propose(&self, doc: &DocumentState, rng: &mut DecoderRng) -> Option<SearchStep> {
        let (sentno, size) = draw_multi_phrase_sentence(doc, rng)?;
        let seg = doc.segmentation(sentno);

        let n = rng.geometric(self.decay, size - 1) + 1;
        let start = rng.uniform(size - n + 1);
        let original = &seg[start..start + n];

        // A run of one can only shuffle to itself; the retry budget below
        // handles it like any other identity permutation.
        let mut shuffled = original.to_vec();
        let mut trials = 0;
        loop {
            rng.shuffle(&mut shuffled);
            if shuffled.as_slice() != original {
                break;
            }
            if trials >= MAX_SHUFFLE_TRIALS {
                return None;
            }
            trials += 1;
        }

        let (prefix, suffix) = trim_common_affixes(original, &shuffled)?;
        let mod_start = start + prefix;
        let mod_end = start + n - suffix;
        debug!(
            sentence = sentno,
            start = mod_start,
            end = mod_end,
            "permute phrases"
        );

        let mut step = SearchStep::new(self.description(), doc);
        step.add_modification(
            sentno,
            mod_start,
            mod_end,
            original[prefix..n - suffix].to_vec(),
            shuffled[prefix..n - suffix].to_vec(),
        );
        Some(step)
    }
}
