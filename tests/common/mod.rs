#![allow(dead_code)]

use std::any::Any;
use std::sync::Arc;
use transforge::collection::PhrasePairCollection;
use transforge::config::Parameters;
use transforge::core_types::{
    is_valid_partition, segmentation_coverage, AnchoredPhrasePair, Coverage, PhrasePair,
    PhraseSegmentation, Word,
};
use transforge::feature::FeatureState;
use transforge::{DecoderRng, DocumentState, SearchStep, StateGenerator, TfResult};

/// In-memory phrase table over one sentence: every contiguous span of up to
/// `max_phrase_len` words has `variants` alternative target realisations.
/// Targets encode (position, variant) so distinct variants never collide.
pub struct TestPhraseTable {
    sentence_length: usize,
    max_phrase_len: usize,
    variants: usize,
}

impl TestPhraseTable {
    pub fn new(sentence_length: usize, max_phrase_len: usize, variants: usize) -> Self {
        assert!(sentence_length > 0 && max_phrase_len > 0 && variants > 0);
        Self {
            sentence_length,
            max_phrase_len,
            variants,
        }
    }

    pub fn pair_for(&self, start: usize, len: usize, variant: usize) -> AnchoredPhrasePair {
        let anchor = Coverage::from_range(start..start + len, self.sentence_length);
        let source: Vec<Word> = (start..start + len).map(|p| p as Word).collect();
        let target: Vec<Word> = (start..start + len)
            .map(|p| 1_000 * (variant as Word + 1) + p as Word)
            .collect();
        AnchoredPhrasePair::new(anchor, PhrasePair { source, target })
    }

    fn span_of(existing: &AnchoredPhrasePair) -> (usize, usize) {
        let start = existing.anchor.first().expect("empty anchor");
        (start, existing.anchor.count())
    }
}

impl PhrasePairCollection for TestPhraseTable {
    fn sentence_length(&self) -> usize {
        self.sentence_length
    }

    fn propose_alternative_translation(
        &self,
        existing: &AnchoredPhrasePair,
        rng: &mut DecoderRng,
    ) -> AnchoredPhrasePair {
        let (start, len) = Self::span_of(existing);
        let variant = rng.uniform(self.variants);
        self.pair_for(start, len, variant)
    }

    fn propose_segmentation(
        &self,
        coverage: Option<&Coverage>,
        rng: &mut DecoderRng,
    ) -> PhraseSegmentation {
        let runs = match coverage {
            None => vec![(0, self.sentence_length)],
            Some(cov) => contiguous_runs(cov),
        };
        let mut seg = Vec::new();
        for (run_start, run_len) in runs {
            let mut pos = run_start;
            let mut remaining = run_len;
            while remaining > 0 {
                let cap = remaining.min(self.max_phrase_len);
                let len = 1 + rng.uniform(cap);
                let variant = rng.uniform(self.variants);
                seg.push(self.pair_for(pos, len, variant));
                pos += len;
                remaining -= len;
            }
        }
        seg
    }

    fn phrases_exist(&self, segmentation: &PhraseSegmentation) -> bool {
        segmentation.iter().all(|pp| {
            let Some(start) = pp.anchor.first() else {
                return false;
            };
            let len = pp.anchor.count();
            if pp.anchor.last() != Some(start + len - 1) {
                return false;
            }
            if start + len > self.sentence_length || len > self.max_phrase_len {
                return false;
            }
            (0..self.variants).any(|v| self.pair_for(start, len, v) == *pp)
        })
    }
}

/// Maximal runs of consecutive set positions.
fn contiguous_runs(cov: &Coverage) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut current: Option<(usize, usize)> = None;
    for pos in cov.ones() {
        current = match current {
            Some((start, len)) if start + len == pos => Some((start, len + 1)),
            Some(run) => {
                runs.push(run);
                Some((pos, 1))
            }
            None => Some((pos, 1)),
        };
    }
    if let Some(run) = current {
        runs.push(run);
    }
    runs
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountingState {
    pub generation: u64,
}

impl FeatureState for CountingState {
    fn clone_box(&self) -> Box<dyn FeatureState> {
        Box::new(self.clone())
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub fn tables_for(
    sentence_lengths: &[usize],
    max_phrase_len: usize,
    variants: usize,
) -> Vec<Arc<dyn PhrasePairCollection>> {
    sentence_lengths
        .iter()
        .map(|&len| {
            Arc::new(TestPhraseTable::new(len, max_phrase_len, variants))
                as Arc<dyn PhrasePairCollection>
        })
        .collect()
}

pub fn counting_states(generation: u64) -> Vec<Box<dyn FeatureState>> {
    vec![Box::new(CountingState { generation }) as Box<dyn FeatureState>]
}

/// Document seeded with one random table segmentation per sentence.
pub fn make_document(
    sentence_lengths: &[usize],
    max_phrase_len: usize,
    variants: usize,
    rng: &mut DecoderRng,
) -> DocumentState {
    let tables = tables_for(sentence_lengths, max_phrase_len, variants);
    let segmentations = tables
        .iter()
        .map(|table| table.propose_segmentation(None, rng))
        .collect();
    DocumentState::new(tables, segmentations, counting_states(0)).expect("valid document")
}

/// Generator with the full operator set under equal weights.
pub fn full_generator(seed: u64) -> TfResult<StateGenerator> {
    let mut generator =
        StateGenerator::new("monotonic", &Parameters::new(), DecoderRng::with_seed(seed))?;
    generator.add_operation(1.0, "change-phrase-translation", &Parameters::new())?;
    generator.add_operation(
        1.0,
        "permute-phrases",
        &Parameters::new().with("phrase-permutation-decay", 0.5),
    )?;
    generator.add_operation(
        1.0,
        "linearise-phrases",
        &Parameters::new().with("phrase-linearisation-decay", 0.5),
    )?;
    generator.add_operation(
        1.0,
        "swap-phrases",
        &Parameters::new().with("swap-distance-decay", 0.5),
    )?;
    generator.add_operation(
        1.0,
        "move-phrases",
        &Parameters::new()
            .with("block-size-decay", 0.5)
            .with("right-distance-decay", 0.5)
            .with("left-distance-decay", 0.5),
    )?;
    generator.add_operation(
        1.0,
        "resegment",
        &Parameters::new().with("phrase-resegmentation-decay", 0.5),
    )?;
    Ok(generator)
}

/// Check the invariants every emitted step must satisfy against the document
/// it was proposed for. Returns the post-step segmentation of the touched
/// sentence.
pub fn check_step(
    doc: &DocumentState,
    step: &SearchStep,
    anchors_preserved: bool,
) -> PhraseSegmentation {
    assert!(
        !step.modifications().is_empty(),
        "{}: empty step",
        step.operation()
    );

    let sentno = step.modifications()[0].sentence;
    for m in step.modifications() {
        assert_eq!(m.sentence, sentno, "step touches more than one sentence");
        let seg = doc.segmentation(m.sentence);
        assert!(m.start <= m.end && m.end <= seg.len(), "range out of bounds");
        assert_eq!(
            &seg[m.start..m.end],
            m.removed.as_slice(),
            "{}: removed slice does not match the document",
            step.operation()
        );
    }

    let before = doc.segmentation(sentno).clone();
    let mut all: Vec<PhraseSegmentation> = doc.segmentations().to_vec();
    step.apply(&mut all);
    let after = all[sentno].clone();

    assert_ne!(before, after, "{}: step is a no-op", step.operation());

    let sentence_length = doc.translation_options(sentno).sentence_length();
    assert!(
        is_valid_partition(&after, sentence_length),
        "{}: coverage partition broken",
        step.operation()
    );
    assert_eq!(
        segmentation_coverage(&before, sentence_length),
        segmentation_coverage(&after, sentence_length)
    );

    if anchors_preserved {
        let mut a: Vec<Coverage> = before.iter().map(|p| p.anchor.clone()).collect();
        let mut b: Vec<Coverage> = after.iter().map(|p| p.anchor.clone()).collect();
        a.sort();
        b.sort();
        assert_eq!(a, b, "{}: anchor multiset changed", step.operation());
    }

    after
}
