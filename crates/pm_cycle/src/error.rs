use std::fmt;
use thiserror::Error;

/// The step of a cycle that produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Topic,
    Outline,
    Article,
    Persist,
    Report,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Topic => "topic generation",
            Stage::Outline => "outline",
            Stage::Article => "article composition",
            Stage::Persist => "article persistence",
            Stage::Report => "email report",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
#[error("{stage} failed: {source}")]
pub struct CycleError {
    pub stage: Stage,
    #[source]
    pub source: pm_core::Error,
}

impl CycleError {
    pub fn new(stage: Stage, source: pm_core::Error) -> Self {
        Self { stage, source }
    }
}

pub(crate) trait StageExt<T> {
    fn at(self, stage: Stage) -> Result<T, CycleError>;
}

impl<T, E: Into<pm_core::Error>> StageExt<T> for Result<T, E> {
    fn at(self, stage: Stage) -> Result<T, CycleError> {
        self.map_err(|e| CycleError::new(stage, e.into()))
    }
}
