use super::{draw_multi_phrase_sentence, Operation};
use crate::config::{validate_decay, validate_probability, Parameters};
use crate::consts::DEFAULT_RIGHT_MOVE_PREFERENCE;
use crate::document::DocumentState;
use crate::error::TfResult;
use crate::rng::DecoderRng;
use crate::step::SearchStep;
use tracing::debug;

/// Moves a contiguous block of phrases to a new position within the same
/// sentence.
pub struct MovePhrases {
    block_size_decay: f64,
    right_move_preference: f64,
    right_distance_decay: f64,
    left_distance_decay: f64,
}

impl MovePhrases {
    pub fn from_params(params: &Parameters) -> TfResult<Self> {
        Ok(Self {
            block_size_decay: validate_decay(
                params.get_float("block-size-decay")?,
                "block-size-decay",
            )?,
            right_move_preference: validate_probability(
                params.get_float_or("right-move-preference", DEFAULT_RIGHT_MOVE_PREFERENCE)?,
                "right-move-preference",
            )?,
            right_distance_decay: validate_decay(
                params.get_float("right-distance-decay")?,
                "right-distance-decay",
            )?,
            left_distance_decay: validate_decay(
                params.get_float("left-distance-decay")?,
                "left-distance-decay",
            )?,
        })
    }
}

impl Operation for MovePhrases {
    fn name(&self) -> &'static str {
        "move-phrases"
    }

    fn description(&self) -> String {
        format!(
            "MovePhrases(block-size-decay={},right-move-preference={},right-distance-decay={},left-distance-decay={})",
            self.block_size_decay,
            self.right_move_preference,
            self.right_distance_decay,
            self.left_distance_decay
        )
    }

    fn propose(&self, doc: &DocumentState, rng: &mut DecoderRng) -> Option<SearchStep> {
        let (sentno, size) = draw_multi_phrase_sentence(doc, rng)?;
        let seg = doc.segmentation(sentno);

        let rightward = rng.coin(self.right_move_preference);
        let block = rng.geometric(self.block_size_decay, size - 2) + 1;
        let mut start = rng.uniform(size - block);

        // A leftward-moving block sits after its insertion point.
        if !rightward {
            start += 1;
        }

        let dest = if rightward {
            if start + block == size - 1 {
                size
            } else {
                let range = size - start - block;
                start + block + rng.geometric(self.right_distance_decay, range - 1) + 1
            }
        } else if start == 1 {
            0
        } else {
            start - (rng.geometric(self.left_distance_decay, start - 1) + 1)
        };
        debug_assert!(dest <= size);
        debug!(sentence = sentno, start, block, dest, "move phrases");

        // Insert-then-delete, both against the pre-move indices; neither
        // modification alone is a valid segmentation.
        let moved = seg[start..start + block].to_vec();
        let mut step = SearchStep::new(self.description(), doc);
        step.add_modification(sentno, dest, dest, vec![], moved.clone());
        step.add_modification(sentno, start, start + block, moved, vec![]);
        Some(step)
    }
}
