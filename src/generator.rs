use crate::collection::PhrasePairCollection;
use crate::config::{GeneratorConfig, Parameters};
use crate::core_types::{PhraseSegmentation, Word};
use crate::document::DocumentState;
use crate::error::{TfResult, TransForgeError};
use crate::feature::FeatureState;
use crate::init::{MonotonicInitialiser, SavedStateInitialiser, StateInitialiser};
use crate::operators::{
    ChangePhraseTranslation, LinearisePhrases, MovePhrases, Operation, PermutePhrases, Resegment,
    SwapPhrases,
};
use crate::rng::DecoderRng;
use crate::step::SearchStep;
use std::sync::Arc;
use tracing::debug;

/// Owns the weighted operator set, the state initialiser and the search RNG.
///
/// Configuration problems (unknown keys, malformed parameters, bad saved
/// state) fail here, at construction; `propose` itself never errors.
pub struct StateGenerator {
    operations: Vec<Box<dyn Operation>>,
    cumulative_weights: Vec<f64>,
    initialiser: Box<dyn StateInitialiser>,
    rng: DecoderRng,
}

impl StateGenerator {
    pub fn new(init_method: &str, params: &Parameters, rng: DecoderRng) -> TfResult<Self> {
        let initialiser: Box<dyn StateInitialiser> = match init_method {
            "monotonic" => Box::new(MonotonicInitialiser::from_params(params)?),
            "saved-state" => Box::new(SavedStateInitialiser::from_params(params)?),
            other => {
                return Err(TransForgeError::Config(format!(
                    "unknown initialisation method: {}",
                    other
                )))
            }
        };
        Ok(Self {
            operations: Vec::new(),
            cumulative_weights: Vec::new(),
            initialiser,
            rng,
        })
    }

    pub fn from_config(config: &GeneratorConfig, rng: DecoderRng) -> TfResult<Self> {
        let mut generator = Self::new(&config.init.method, &config.init.params, rng)?;
        for op in &config.operations {
            generator.add_operation(op.weight, &op.op_type, &op.params)?;
        }
        if generator.operations.is_empty() {
            return Err(TransForgeError::Config(
                "generator config declares no operations".to_string(),
            ));
        }
        Ok(generator)
    }

    /// Register one operator under the given selection weight.
    pub fn add_operation(
        &mut self,
        weight: f64,
        op_type: &str,
        params: &Parameters,
    ) -> TfResult<()> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(TransForgeError::Config(format!(
                "operation {} has invalid weight {}",
                op_type, weight
            )));
        }
        let operation: Box<dyn Operation> = match op_type {
            "change-phrase-translation" => Box::new(ChangePhraseTranslation::from_params(params)?),
            "permute-phrases" => Box::new(PermutePhrases::from_params(params)?),
            "linearise-phrases" => Box::new(LinearisePhrases::from_params(params)?),
            "swap-phrases" => Box::new(SwapPhrases::from_params(params)?),
            "move-phrases" => Box::new(MovePhrases::from_params(params)?),
            "resegment" => Box::new(Resegment::from_params(params)?),
            other => {
                return Err(TransForgeError::Config(format!(
                    "unknown operation: {}",
                    other
                )))
            }
        };
        self.operations.push(operation);

        let cumulative = weight + self.cumulative_weights.last().copied().unwrap_or(0.0);
        self.cumulative_weights.push(cumulative);
        Ok(())
    }

    pub fn operation_descriptions(&self) -> Vec<String> {
        self.operations.iter().map(|op| op.description()).collect()
    }

    /// Draw operators by weight until one produces a non-empty step.
    ///
    /// No-proposals are normal and absorbed by retrying; the loop terminates
    /// almost surely as long as some operator can change the document.
    pub fn propose(&mut self, doc: &DocumentState) -> SearchStep {
        assert!(
            !self.operations.is_empty(),
            "propose called on a generator without operations"
        );
        loop {
            let idx = self.rng.select_cumulative(&self.cumulative_weights);
            match self.operations[idx].propose(doc, &mut self.rng) {
                Some(step) if !step.modifications().is_empty() => return step,
                Some(_) => debug!(operation = self.operations[idx].name(), "empty step"),
                None => debug!(operation = self.operations[idx].name(), "no proposal"),
            }
        }
    }

    /// Starting segmentation for one sentence, via the configured
    /// initialiser.
    pub fn init_segmentation(
        &mut self,
        translations: &dyn PhrasePairCollection,
        sentence: &[Word],
        document_number: usize,
        sentence_number: usize,
    ) -> TfResult<PhraseSegmentation> {
        self.initialiser.init_segmentation(
            translations,
            sentence,
            document_number,
            sentence_number,
            &mut self.rng,
        )
    }

    /// Build a full document state by running the initialiser over every
    /// sentence.
    pub fn init_document(
        &mut self,
        document_number: usize,
        translations: Vec<Arc<dyn PhrasePairCollection>>,
        sentences: &[Vec<Word>],
        feature_states: Vec<Box<dyn FeatureState>>,
    ) -> TfResult<DocumentState> {
        if translations.len() != sentences.len() {
            return Err(TransForgeError::Config(format!(
                "{} phrase collections for {} sentences",
                translations.len(),
                sentences.len()
            )));
        }
        let mut segmentations = Vec::with_capacity(sentences.len());
        for (sentence_number, words) in sentences.iter().enumerate() {
            let seg = self.initialiser.init_segmentation(
                translations[sentence_number].as_ref(),
                words,
                document_number,
                sentence_number,
                &mut self.rng,
            )?;
            segmentations.push(seg);
        }
        DocumentState::new(translations, segmentations, feature_states)
    }
}
