use crate::core_types::{AnchoredPhrasePair, Coverage, PhraseSegmentation};
use crate::rng::DecoderRng;

/// Per-sentence phrase-table view consumed by the proposal engine.
///
/// Implementations live with the phrase table; the engine only samples from
/// them. All sampling draws go through the caller's RNG handle so proposals
/// stay reproducible.
pub trait PhrasePairCollection {
    /// Length of the source sentence this collection was built for.
    fn sentence_length(&self) -> usize;

    /// Draw an alternative translation over the same source span as
    /// `existing`. May return a pair equal to `existing`; the caller treats
    /// that as a failed proposal.
    fn propose_alternative_translation(
        &self,
        existing: &AnchoredPhrasePair,
        rng: &mut DecoderRng,
    ) -> AnchoredPhrasePair;

    /// Sample a segmentation covering exactly `coverage`, or the full
    /// sentence when `coverage` is `None`.
    fn propose_segmentation(
        &self,
        coverage: Option<&Coverage>,
        rng: &mut DecoderRng,
    ) -> PhraseSegmentation;

    /// True when every pair of the segmentation exists in the table.
    fn phrases_exist(&self, segmentation: &PhraseSegmentation) -> bool;
}
