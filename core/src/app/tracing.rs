use std::io;

use tracing_subscriber::{EnvFilter, Layer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use crate::maybe::Maybe;

/// Environment variable holding the console filter directives when no filter is set explicitly.
pub const CONSOLE_LOG_VAR: &str = "CONSOLE_LOG";

#[derive(Default)]
pub struct AppTracingBuilder {
  console_filter: Maybe<EnvFilter>,
  filter_var: Maybe<&'static str>,
  fallback_directives: Maybe<String>,
}
impl AppTracingBuilder {
  pub fn with_console_filter(mut self, console_filter: EnvFilter) -> Self {
    self.console_filter = Maybe::present(console_filter);
    self
  }
  pub fn with_console_filter_opt(mut self, console_filter: Maybe<EnvFilter>) -> Self {
    self.console_filter = console_filter;
    self
  }

  /// Read filter directives from `filter_var` instead of [`CONSOLE_LOG_VAR`].
  pub fn with_filter_var(mut self, filter_var: &'static str) -> Self {
    self.filter_var = Maybe::present(filter_var);
    self
  }

  /// Directives used when neither an explicit filter nor the filter variable is available.
  pub fn with_fallback_directives(mut self, directives: impl Into<String>) -> Self {
    self.fallback_directives = Maybe::present(directives.into());
    self
  }

  fn resolve_filter(self) -> EnvFilter {
    let filter_var = self.filter_var.unwrap_or(CONSOLE_LOG_VAR);
    let fallback_directives = self.fallback_directives;
    self.console_filter
      .or_else(|| Maybe::from_nullable(EnvFilter::try_from_env(filter_var).ok()))
      .or_else(|| fallback_directives.and_then(|directives| Maybe::from_nullable(EnvFilter::try_new(directives).ok())))
      .unwrap_or_default()
  }

  /// Installs a global subscriber logging to stderr. Fails if a global subscriber was already installed.
  pub fn build(self) -> Result<AppTracing, TryInitError> {
    let console_filter = self.resolve_filter();
    let directives = console_filter.to_string();

    tracing_subscriber::registry()
      .with(
        tracing_subscriber::fmt::layer()
          .with_writer(io::stderr)
          .with_filter(console_filter)
      )
      .try_init()?;

    Ok(AppTracing { directives })
  }
}

/// Handle for the installed subscriber.
#[derive(Debug)]
pub struct AppTracing {
  directives: String,
}
impl AppTracing {
  /// Filter directives the console layer was installed with.
  pub fn directives(&self) -> &str { &self.directives }
}
