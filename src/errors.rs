use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("end of input")]
    InputExhausted,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
