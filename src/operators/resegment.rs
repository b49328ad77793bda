use super::{trim_common_affixes, Operation};
use crate::config::{validate_decay, Parameters};
use crate::core_types::Coverage;
use crate::document::DocumentState;
use crate::error::TfResult;
use crate::rng::DecoderRng;
use crate::step::SearchStep;
use tracing::debug;

/// Re-draws the segmentation of a geometrically-sized run of phrases from
/// the phrase table, over exactly the source coverage of that run.
pub struct Resegment {
    decay: f64,
}

impl Resegment {
    pub fn from_params(params: &Parameters) -> TfResult<Self> {
        let decay = validate_decay(
            params.get_float("phrase-resegmentation-decay")?,
            "phrase-resegmentation-decay",
        )?;
        Ok(Self { decay })
    }
}

impl Operation for Resegment {
    fn name(&self) -> &'static str {
        "resegment"
    }

    fn description(&self) -> String {
        format!("Resegment(decay={})", self.decay)
    }

    fn propose(&self, doc: &DocumentState, rng: &mut DecoderRng) -> Option<SearchStep> {
        let sentno = doc.draw_sentence(rng);
        let seg = doc.segmentation(sentno);
        let size = seg.len();
        let collection = doc.translation_options(sentno);

        let n = rng.geometric(self.decay, size - 1) + 1;
        let start = rng.uniform(size - n + 1);
        let original = &seg[start..start + n];

        let mut target = Coverage::new(collection.sentence_length());
        for pp in original {
            target.union_with(&pp.anchor);
        }
        debug!(sentence = sentno, coverage = %target, "resegmenting");

        let newseg = collection.propose_segmentation(Some(&target), rng);

        let (prefix, suffix) = trim_common_affixes(original, &newseg)?;
        let mod_start = start + prefix;
        let mod_end = start + n - suffix;

        let mut step = SearchStep::new(self.description(), doc);
        step.add_modification(
            sentno,
            mod_start,
            mod_end,
            original[prefix..n - suffix].to_vec(),
            newseg[prefix..newseg.len() - suffix].to_vec(),
        );
        Some(step)
    }
}
