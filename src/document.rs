use crate::collection::PhrasePairCollection;
use crate::core_types::PhraseSegmentation;
use crate::error::{TfResult, TransForgeError};
use crate::feature::FeatureState;
use crate::rng::DecoderRng;
use crate::step::SearchStep;
use std::sync::Arc;

/// Current decoding state of one document.
///
/// The proposal engine only reads this; the single mutation channel is
/// `apply_step`, driven by the external acceptor once a proposal has been
/// scored. Phrase-pair collections are shared read-only with the table side.
pub struct DocumentState {
    segmentations: Vec<PhraseSegmentation>,
    translations: Vec<Arc<dyn PhrasePairCollection>>,
    feature_states: Vec<Box<dyn FeatureState>>,
    cumulative_lengths: Vec<f64>,
}

impl DocumentState {
    pub fn new(
        translations: Vec<Arc<dyn PhrasePairCollection>>,
        segmentations: Vec<PhraseSegmentation>,
        feature_states: Vec<Box<dyn FeatureState>>,
    ) -> TfResult<Self> {
        if translations.is_empty() {
            return Err(TransForgeError::Config(
                "document has no sentences".to_string(),
            ));
        }
        if translations.len() != segmentations.len() {
            return Err(TransForgeError::Config(format!(
                "{} phrase collections for {} segmentations",
                translations.len(),
                segmentations.len()
            )));
        }
        for (sentno, seg) in segmentations.iter().enumerate() {
            if seg.is_empty() {
                return Err(TransForgeError::Config(format!(
                    "sentence {} has an empty segmentation",
                    sentno
                )));
            }
        }

        let mut cumulative_lengths = Vec::with_capacity(translations.len());
        let mut total = 0.0;
        for coll in &translations {
            total += coll.sentence_length() as f64;
            cumulative_lengths.push(total);
        }

        Ok(Self {
            segmentations,
            translations,
            feature_states,
            cumulative_lengths,
        })
    }

    pub fn sentence_count(&self) -> usize {
        self.segmentations.len()
    }

    pub fn segmentation(&self, sentence: usize) -> &PhraseSegmentation {
        &self.segmentations[sentence]
    }

    pub fn segmentations(&self) -> &[PhraseSegmentation] {
        &self.segmentations
    }

    pub fn translation_options(&self, sentence: usize) -> &dyn PhrasePairCollection {
        self.translations[sentence].as_ref()
    }

    pub fn feature_states(&self) -> &[Box<dyn FeatureState>] {
        &self.feature_states
    }

    /// Sample a sentence index weighted by source sentence length.
    pub fn draw_sentence(&self, rng: &mut DecoderRng) -> usize {
        rng.select_cumulative(&self.cumulative_lengths)
    }

    /// Acceptor-side mutation: apply an accepted step to the segmentations.
    pub fn apply_step(&mut self, step: &SearchStep) {
        step.apply(&mut self.segmentations);
    }
}
