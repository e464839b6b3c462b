use thiserror::Error;

/// Document-shape failures. Everything below the document shape (odd wave
/// characters, mismatched data labels) degrades visually instead of erroring.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("input is not valid WaveJSON: {0}")]
    Syntax(String),
    #[error("the root has to be an object: {{signal:[...]}}")]
    NotAnObject,
    #[error("\"signal\" has to be an array: signal:[...]")]
    SignalNotArray,
    #[error("\"assign\" has to be an array: assign:[...]")]
    AssignNotArray,
    #[error("\"signal:[...]\" or \"assign:[...]\" property is missing inside the root object")]
    MissingBody,
}
