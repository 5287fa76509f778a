// Data models for the inference wire format

pub mod inference;

pub use inference::{DataType, InferInput, InferOutput, InferenceRequest, OutputParameters};
