use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Browser(#[from] pagecheck_browser::Error),

    #[error(transparent)]
    Core(#[from] pagecheck_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
