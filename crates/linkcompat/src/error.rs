use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("unknown match strategy {0:?}, expected \"exact\" or \"partial\"")]
    UnknownStrategy(String),
}
