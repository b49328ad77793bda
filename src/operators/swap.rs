use super::{draw_multi_phrase_sentence, Operation};
use crate::config::{validate_decay, Parameters};
use crate::document::DocumentState;
use crate::error::TfResult;
use crate::rng::DecoderRng;
use crate::step::SearchStep;
use tracing::debug;

/// Swaps two phrases, the second drawn at a geometric distance from the
/// first toward a random side.
pub struct SwapPhrases {
    decay: f64,
}

impl SwapPhrases {
    pub fn from_params(params: &Parameters) -> TfResult<Self> {
        let decay = validate_decay(
            params.get_float("swap-distance-decay")?,
            "swap-distance-decay",
        )?;
        Ok(Self { decay })
    }
}

impl Operation for SwapPhrases {
    fn name(&self) -> &'static str {
        "swap-phrases"
    }

    fn description(&self) -> String {
        format!("SwapPhrases(decay={})", self.decay)
    }

    fn propose(&self, doc: &DocumentState, rng: &mut DecoderRng) -> Option<SearchStep> {
        let (sentno, size) = draw_multi_phrase_sentence(doc, rng)?;
        let seg = doc.segmentation(sentno);

        let phrase1 = rng.uniform(size);
        let rightward = if phrase1 == 0 {
            true
        } else if phrase1 == size - 1 {
            false
        } else {
            rng.coin(0.5)
        };

        let phrase2 = if rightward {
            if phrase1 == size - 2 {
                // Only one cell to the right.
                size - 1
            } else {
                let range = size - phrase1 - 1;
                phrase1 + rng.geometric(self.decay, range - 1) + 1
            }
        } else if phrase1 == 1 {
            0
        } else {
            phrase1 - (rng.geometric(self.decay, phrase1 - 1) + 1)
        };
        debug_assert!(phrase2 < size && phrase2 != phrase1);
        debug!(sentence = sentno, phrase1, phrase2, "swap phrases");

        // Both replacements are recorded against the pre-swap indices; the
        // acceptor applies them atomically.
        let mut step = SearchStep::new(self.description(), doc);
        step.add_modification(
            sentno,
            phrase1,
            phrase1 + 1,
            vec![seg[phrase1].clone()],
            vec![seg[phrase2].clone()],
        );
        step.add_modification(
            sentno,
            phrase2,
            phrase2 + 1,
            vec![seg[phrase2].clone()],
            vec![seg[phrase1].clone()],
        );
        Some(step)
    }
}
