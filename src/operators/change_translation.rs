use super::Operation;
use crate::config::Parameters;
use crate::document::DocumentState;
use crate::error::TfResult;
use crate::rng::DecoderRng;
use crate::step::SearchStep;
use tracing::debug;

/// Replaces the translation of one phrase with an alternative drawn from
/// the phrase table for the same source span.
pub struct ChangePhraseTranslation;

impl ChangePhraseTranslation {
    pub fn from_params(_params: &Parameters) -> TfResult<Self> {
        Ok(Self)
    }
}

impl Operation for ChangePhraseTranslation {
    fn name(&self) -> &'static str {
        "change-phrase-translation"
    }

    fn description(&self) -> String {
        "ChangePhraseTranslation".to_string()
    }

    fn propose(&self, doc: &DocumentState, rng: &mut DecoderRng) -> Option<SearchStep> {
        let sentno = doc.draw_sentence(rng);
        let seg = doc.segmentation(sentno);
        let size = seg.len();
        debug!(sentence = sentno, size, "change phrase translation");

        let ph = rng.uniform(size);
        let old = &seg[ph];
        let proposed = doc
            .translation_options(sentno)
            .propose_alternative_translation(old, rng);
        if proposed == *old {
            return None;
        }

        let mut step = SearchStep::new(self.description(), doc);
        step.add_modification(sentno, ph, ph + 1, vec![old.clone()], vec![proposed]);
        Some(step)
    }
}
