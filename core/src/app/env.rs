//! Environment configuration, looked up as [`Maybe`] values.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::maybe::Maybe;

/// Loads variables from a `.env` file (searched for in the current directory and its ancestors) into the process
/// environment, returning the path of the loaded file, or absent if there is no such file.
///
/// # Errors
///
/// Returns an error if a `.env` file was found but could not be read or parsed.
pub fn load_dotenv_into_env() -> Result<Maybe<PathBuf>, dotenvy::Error> {
  found(dotenvy::dotenv())
}

/// Loads variables from the `.env`-formatted file at `path` into the process environment. Absent if the file does
/// not exist.
///
/// # Errors
///
/// Returns an error if the file exists but could not be read or parsed.
pub fn load_dotenv_file_into_env(path: impl AsRef<Path>) -> Result<Maybe<PathBuf>, dotenvy::Error> {
  let path = path.as_ref();
  found(dotenvy::from_path(path).map(|_| path.to_path_buf()))
}

fn found(result: Result<PathBuf, dotenvy::Error>) -> Result<Maybe<PathBuf>, dotenvy::Error> {
  match result {
    Ok(path) => {
      debug!(path = %path.display(), "loaded .env file");
      Ok(Maybe::present(path))
    }
    Err(cause) if cause.not_found() => {
      debug!("no .env file found; continuing with the process environment");
      Ok(Maybe::ABSENT)
    }
    Err(cause) => Err(cause),
  }
}

/// Looks up environment variable `name`. Absent if it is not set or not valid unicode.
#[inline]
pub fn var(name: impl AsRef<OsStr>) -> Maybe<String> {
  Maybe::from_nullable(std::env::var(name).ok())
}

/// Looks up environment variable `name`, treating an empty value as absent.
#[inline]
pub fn var_non_empty(name: impl AsRef<OsStr>) -> Maybe<String> {
  var(name).filter(|value| !value.is_empty())
}

/// Looks up environment variable `name`, or returns `default` if it is absent.
#[inline]
pub fn var_or(name: impl AsRef<OsStr>, default: impl Into<String>) -> String {
  var(name).unwrap_or_else(|| default.into())
}
