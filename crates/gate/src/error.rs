use policy::Response;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid ability name: {0:?}")]
    InvalidAbility(String),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Policy(#[from] policy::Error),
}

impl Error {
    /// The denying response when this error is a denial.
    pub fn denial(&self) -> Option<&Response> {
        match self {
            Self::Policy(err) => err.response(),
            _ => None,
        }
    }

    pub fn is_denied(&self) -> bool {
        self.denial().is_some()
    }

    /// The HTTP-style status a denial carries, if one was set.
    pub fn status(&self) -> Option<u16> {
        self.denial().and_then(Response::status)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
