use crate::collection::PhrasePairCollection;
use crate::config::Parameters;
use crate::core_types::{PhraseSegmentation, Word};
use crate::error::{TfResult, TransForgeError};
use crate::rng::DecoderRng;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

/// Produces the starting segmentation for each sentence of a document.
pub trait StateInitialiser {
    fn init_segmentation(
        &self,
        translations: &dyn PhrasePairCollection,
        sentence: &[Word],
        document_number: usize,
        sentence_number: usize,
        rng: &mut DecoderRng,
    ) -> TfResult<PhraseSegmentation>;
}

/// Seeds every sentence with one table-sampled covering of the full
/// sentence.
pub struct MonotonicInitialiser;

impl MonotonicInitialiser {
    pub fn from_params(_params: &Parameters) -> TfResult<Self> {
        Ok(Self)
    }
}

impl StateInitialiser for MonotonicInitialiser {
    fn init_segmentation(
        &self,
        translations: &dyn PhrasePairCollection,
        _sentence: &[Word],
        _document_number: usize,
        _sentence_number: usize,
        rng: &mut DecoderRng,
    ) -> TfResult<PhraseSegmentation> {
        Ok(translations.propose_segmentation(None, rng))
    }
}

/// Replays segmentations recorded by an earlier run.
///
/// The file is deserialized once at construction; every pair is checked
/// against the current phrase table when a sentence is initialised.
pub struct SavedStateInitialiser {
    segmentations: Vec<Vec<PhraseSegmentation>>,
}

impl SavedStateInitialiser {
    pub fn from_params(params: &Parameters) -> TfResult<Self> {
        let filename = params.get_str("file")?;
        let file = File::open(filename).map_err(|e| {
            TransForgeError::Config(format!("cannot open saved state file {}: {}", filename, e))
        })?;
        let segmentations = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            TransForgeError::FileFormat(format!("malformed saved state file {}: {}", filename, e))
        })?;
        info!(file = filename, "restored saved segmentations");
        Ok(Self { segmentations })
    }
}

impl StateInitialiser for SavedStateInitialiser {
    fn init_segmentation(
        &self,
        translations: &dyn PhrasePairCollection,
        _sentence: &[Word],
        document_number: usize,
        sentence_number: usize,
        _rng: &mut DecoderRng,
    ) -> TfResult<PhraseSegmentation> {
        let seg = self
            .segmentations
            .get(document_number)
            .and_then(|doc| doc.get(sentence_number))
            .ok_or_else(|| {
                TransForgeError::Config(format!(
                    "saved state has no entry for document {} sentence {}",
                    document_number, sentence_number
                ))
            })?;
        if !translations.phrases_exist(seg) {
            return Err(TransForgeError::Config(
                "a phrase from the saved state does not exist in the phrase table; \
                 use the same phrase table as when the state was saved"
                    .to_string(),
            ));
        }
        Ok(seg.clone())
    }
}

/// Writer counterpart of the `saved-state` initialiser: serializes
/// `documents x sentences x segmentation` so a later run can replay it.
pub fn write_saved_state<P: AsRef<Path>>(
    path: P,
    segmentations: &[Vec<PhraseSegmentation>],
) -> TfResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer(BufWriter::new(file), segmentations)?;
    Ok(())
}
