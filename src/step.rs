use crate::core_types::{AnchoredPhrasePair, PhraseSegmentation};
use crate::document::DocumentState;
use crate::feature::FeatureState;

/// Replacement of a contiguous phrase range of one sentence.
///
/// `start..end` is a half-open range into the segmentation as it looked when
/// the step was created; `removed` preserves the replaced slice for undo.
#[derive(Debug, Clone, PartialEq)]
pub struct Modification {
    pub sentence: usize,
    pub start: usize,
    pub end: usize,
    pub removed: Vec<AnchoredPhrasePair>,
    pub inserted: Vec<AnchoredPhrasePair>,
}

/// One candidate move: a bundle of localized phrase-range replacements plus
/// a snapshot of per-feature state taken when the step was proposed.
///
/// Steps are created by an operator, handed to the acceptor, and either
/// applied or dropped. All modification indices refer to the pre-step
/// segmentation; `apply` handles them atomically.
#[derive(Debug)]
pub struct SearchStep {
    operation: String,
    feature_states: Vec<Box<dyn FeatureState>>,
    modifications: Vec<Modification>,
}

impl SearchStep {
    pub fn new(operation: impl Into<String>, doc: &DocumentState) -> Self {
        Self {
            operation: operation.into(),
            feature_states: doc.feature_states().to_vec(),
            modifications: Vec::new(),
        }
    }

    /// Tag of the operation that proposed this step.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Feature states as they were when the step was proposed.
    pub fn feature_states(&self) -> &[Box<dyn FeatureState>] {
        &self.feature_states
    }

    pub fn modifications(&self) -> &[Modification] {
        &self.modifications
    }

    pub fn add_modification(
        &mut self,
        sentence: usize,
        start: usize,
        end: usize,
        removed: Vec<AnchoredPhrasePair>,
        inserted: Vec<AnchoredPhrasePair>,
    ) {
        debug_assert!(start <= end);
        self.modifications.push(Modification {
            sentence,
            start,
            end,
            removed,
            inserted,
        });
    }

    /// Apply all modifications against the pre-step indices.
    ///
    /// Ranges within one sentence must not overlap; applying them in
    /// descending start order keeps every recorded index valid while the
    /// segmentation shifts underneath.
    pub fn apply(&self, segmentations: &mut [PhraseSegmentation]) {
        let mut order: Vec<usize> = (0..self.modifications.len()).collect();
        order.sort_by(|&a, &b| self.modifications[b].start.cmp(&self.modifications[a].start));

        for i in order {
            let m = &self.modifications[i];
            let seg = &mut segmentations[m.sentence];
            debug_assert_eq!(
                &seg[m.start..m.end],
                m.removed.as_slice(),
                "modification does not match the current segmentation"
            );
            seg.splice(m.start..m.end, m.inserted.iter().cloned());
        }
    }
}
