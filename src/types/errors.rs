use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenderError {
    #[error("Gender error: unrecognised value '{0}'")]
    Unknown(String)
}
