use serde::{Deserialize, Serialize};

use crate::tokenizer::TokenizedInput;

// ==================================================================================================
// Request Models
// ==================================================================================================

/// Element type of an input tensor, serialized with the protocol's upper-case names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataType {
    Int32,
    Int64,
    Fp32,
}

/// KServe v2 inference request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceRequest {
    pub id: String,
    pub inputs: Vec<InferInput>,
    pub outputs: Vec<InferOutput>,
}

/// Named input tensor; `data` is flattened in row-major order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferInput {
    pub name: String,
    pub shape: Vec<usize>,
    pub datatype: DataType,
    pub data: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferOutput {
    pub name: String,
    pub parameters: OutputParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputParameters {
    pub binary_data: bool,
}

impl InferInput {
    pub fn int64(name: &str, shape: &[usize], data: &[i64]) -> Self {
        Self {
            name: name.to_string(),
            shape: shape.to_vec(),
            datatype: DataType::Int64,
            data: data.to_vec(),
        }
    }
}

impl InferOutput {
    /// Requests the output as JSON rather than as an appended binary blob
    pub fn json(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parameters: OutputParameters { binary_data: false },
        }
    }
}

impl InferenceRequest {
    /// Build the classification request for a tokenized sentence.
    ///
    /// Inputs are emitted in the order the ONNX model declares them:
    /// `input_ids`, `token_type_ids`, `attention_mask`. A single `output`
    /// tensor is requested inline.
    pub fn from_tokens(id: &str, tokens: &TokenizedInput) -> Self {
        let shape = tokens.shape();
        Self {
            id: id.to_string(),
            inputs: vec![
                InferInput::int64("input_ids", &shape, &tokens.input_ids),
                InferInput::int64("token_type_ids", &shape, &tokens.token_type_ids),
                InferInput::int64("attention_mask", &shape, &tokens.attention_mask),
            ],
            outputs: vec![InferOutput::json("output")],
        }
    }

    /// Look up an input tensor by name
    pub fn input(&self, name: &str) -> Option<&InferInput> {
        self.inputs.iter().find(|input| input.name == name)
    }
}
