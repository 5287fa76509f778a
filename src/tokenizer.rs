// Tokenization module
// Wraps a Hugging Face `tokenizers` pipeline and turns one sentence into the
// three INT64 tensors a BERT-style classifier expects.
//
// Three sources are supported: a hub identifier, a serialized tokenizer.json,
// or a plain BERT vocab.txt that is assembled into an uncased WordPiece
// pipeline ([CLS] text [SEP]).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokenizers::models::wordpiece::WordPiece;
use tokenizers::normalizers::bert::BertNormalizer;
use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
use tokenizers::processors::bert::BertProcessing;
use tokenizers::{Tokenizer, TruncationParams};

use crate::error::{BenchError, Result};

/// Tokenizer used by the reference SST-2 deployment
pub const DEFAULT_TOKENIZER: &str = "philschmid/MiniLM-L6-H384-uncased-sst2";

const UNK_TOKEN: &str = "[UNK]";
const CLS_TOKEN: &str = "[CLS]";
const SEP_TOKEN: &str = "[SEP]";

/// Where to load the tokenizer from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenizerSource {
    /// Hugging Face hub identifier, fetched over HTTP and cached locally
    Pretrained(String),
    /// Serialized `tokenizer.json`
    File(PathBuf),
    /// BERT `vocab.txt`, one token per line, id = line number
    Vocab(PathBuf),
}

impl Default for TokenizerSource {
    fn default() -> Self {
        TokenizerSource::Pretrained(DEFAULT_TOKENIZER.to_string())
    }
}

impl std::fmt::Display for TokenizerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenizerSource::Pretrained(id) => write!(f, "hub:{}", id),
            TokenizerSource::File(path) => write!(f, "file:{}", path.display()),
            TokenizerSource::Vocab(path) => write!(f, "vocab:{}", path.display()),
        }
    }
}

/// Token tensors for a single sentence (batch size 1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedInput {
    pub input_ids: Vec<i64>,
    pub token_type_ids: Vec<i64>,
    pub attention_mask: Vec<i64>,
}

impl TokenizedInput {
    /// Sequence length shared by all three tensors
    pub fn seq_len(&self) -> usize {
        self.input_ids.len()
    }

    /// Tensor shape `[batch, sequence]`
    pub fn shape(&self) -> [usize; 2] {
        [1, self.seq_len()]
    }
}

/// Tokenizer with truncation fixed to a maximum sequence length
pub struct InputTokenizer {
    inner: Tokenizer,
    max_length: usize,
}

impl InputTokenizer {
    /// Load a tokenizer from `source` and truncate to `max_length` tokens
    pub fn load(source: &TokenizerSource, max_length: usize) -> Result<Self> {
        tracing::debug!(source = %source, max_length, "Loading tokenizer");

        let tokenizer = match source {
            TokenizerSource::Pretrained(id) => Tokenizer::from_pretrained(id, None)
                .map_err(|e| BenchError::Tokenizer(format!("failed to fetch {}: {}", id, e)))?,
            TokenizerSource::File(path) => Tokenizer::from_file(path).map_err(|e| {
                BenchError::Tokenizer(format!("failed to read {}: {}", path.display(), e))
            })?,
            TokenizerSource::Vocab(path) => bert_wordpiece(read_vocab(path)?)?,
        };

        Self::new(tokenizer, max_length)
    }

    /// Build an uncased BERT WordPiece tokenizer from an in-memory vocabulary.
    ///
    /// Token ids follow the order of `tokens`. The vocabulary must contain
    /// `[UNK]`, `[CLS]` and `[SEP]`.
    pub fn from_vocab<S: AsRef<str>>(tokens: &[S], max_length: usize) -> Result<Self> {
        let vocab = tokens
            .iter()
            .enumerate()
            .map(|(id, token)| (token.as_ref().to_string(), id as u32))
            .collect();
        Self::new(bert_wordpiece(vocab)?, max_length)
    }

    /// Wrap an already-built tokenizer, overriding its truncation and padding
    pub fn new(mut tokenizer: Tokenizer, max_length: usize) -> Result<Self> {
        if max_length == 0 {
            return Err(BenchError::Tokenizer(
                "max_length must be greater than zero".to_string(),
            ));
        }

        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length,
                ..Default::default()
            }))
            .map_err(|e| BenchError::Tokenizer(e.to_string()))?;
        tokenizer.with_padding(None);

        Ok(Self {
            inner: tokenizer,
            max_length,
        })
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Encode `text` with special tokens, truncated to `max_length`
    pub fn encode(&self, text: &str) -> Result<TokenizedInput> {
        let encoding = self
            .inner
            .encode(text, true)
            .map_err(|e| BenchError::Tokenizer(e.to_string()))?;

        let widen = |values: &[u32]| values.iter().map(|&v| i64::from(v)).collect::<Vec<i64>>();
        let tokens = TokenizedInput {
            input_ids: widen(encoding.get_ids()),
            token_type_ids: widen(encoding.get_type_ids()),
            attention_mask: widen(encoding.get_attention_mask()),
        };

        tracing::debug!(seq_len = tokens.seq_len(), "Tokenized input");
        Ok(tokens)
    }
}

/// Read a BERT vocab.txt into a token -> id map
fn read_vocab(path: &Path) -> Result<HashMap<String, u32>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        BenchError::Tokenizer(format!("failed to read {}: {}", path.display(), e))
    })?;

    Ok(content
        .lines()
        .enumerate()
        .map(|(id, token)| (token.trim_end().to_string(), id as u32))
        .collect())
}

fn bert_wordpiece(vocab: HashMap<String, u32>) -> Result<Tokenizer> {
    let special_id = |token: &str| {
        vocab.get(token).copied().ok_or_else(|| {
            BenchError::Tokenizer(format!("vocabulary is missing {}", token))
        })
    };
    special_id(UNK_TOKEN)?;
    let cls_id = special_id(CLS_TOKEN)?;
    let sep_id = special_id(SEP_TOKEN)?;

    let model = WordPiece::builder()
        .vocab(vocab)
        .unk_token(UNK_TOKEN.to_string())
        .build()
        .map_err(|e| BenchError::Tokenizer(e.to_string()))?;

    let mut tokenizer = Tokenizer::new(model);
    tokenizer
        .with_normalizer(BertNormalizer::new(true, true, None, true))
        .with_pre_tokenizer(BertPreTokenizer)
        .with_post_processor(BertProcessing::new(
            (SEP_TOKEN.to_string(), sep_id),
            (CLS_TOKEN.to_string(), cls_id),
        ));

    Ok(tokenizer)
}
