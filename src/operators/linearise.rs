use super::{draw_multi_phrase_sentence, trim_common_affixes, Operation};
use crate::config::{validate_decay, Parameters};
use crate::core_types::compare_by_anchor;
use crate::document::DocumentState;
use crate::error::TfResult;
use crate::rng::DecoderRng;
use crate::step::SearchStep;
use itertools::Itertools;
use std::cmp::Ordering;
use tracing::debug;

/// Sorts a geometrically-sized run of phrases into ascending source-anchor
/// order, nudging the target order toward monotone.
pub struct LinearisePhrases {
    decay: f64,
}

impl LinearisePhrases {
    pub fn from_params(params: &Parameters) -> TfResult<Self> {
        let decay = validate_decay(
            params.get_float("phrase-linearisation-decay")?,
            "phrase-linearisation-decay",
        )?;
        Ok(Self { decay })
    }
}

impl Operation for LinearisePhrases {
    fn name(&self) -> &'static str {
        "linearise-phrases"
    }

    fn description(&self) -> String {
        format!("LinearisePhrases(decay={})", self.decay)
    }

    fn propose(&self, doc: &DocumentState, rng: &mut DecoderRng) -> Option<SearchStep> {
        let (sentno, size) = draw_multi_phrase_sentence(doc, rng)?;
        let seg = doc.segmentation(sentno);

        let n = rng.geometric(self.decay, size - 1) + 1;
        let start = rng.uniform(size - n + 1);
        let original = &seg[start..start + n];

        let monotonic = original
            .iter()
            .tuple_windows()
            .all(|(a, b)| compare_by_anchor(a, b) == Ordering::Less);
        if monotonic {
            return None;
        }

        let mut sorted = original.to_vec();
        sorted.sort_by(compare_by_anchor);

        let (prefix, suffix) = trim_common_affixes(original, &sorted)?;
        let mod_start = start + prefix;
        let mod_end = start + n - suffix;
        debug!(
            sentence = sentno,
            start = mod_start,
            end = mod_end,
            "linearise phrases"
        );

        let mut step = SearchStep::new(self.description(), doc);
        step.add_modification(
            sentno,
            mod_start,
            mod_end,
            original[prefix..n - suffix].to_vec(),
            sorted[prefix..n - suffix].to_vec(),
        );
        Some(step)
    }
}
