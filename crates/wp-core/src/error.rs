use thiserror::Error;

pub type WpResult<T> = Result<T, WpError>;

#[derive(Error, Debug)]
pub enum WpError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}
