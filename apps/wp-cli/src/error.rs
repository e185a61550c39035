use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Project error: {0}")]
    Project(#[from] wp_project::ProjectError),

    #[error("Evaluation error: {0}")]
    Sim(#[from] wp_sim::SimError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Project defines no efficiency map")]
    NoMap,
}

pub type CliResult<T> = Result<T, CliError>;
