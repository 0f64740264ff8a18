use std::io::{self, Write};

use thiserror::Error;
use tracing::{debug, info, instrument};

use maybe_core::app::env;
use maybe_core::Maybe;

/// Environment variable supplying the default value when none is given on the command line.
pub const DEFAULT_VAR: &str = "MAYBE_PROBE_DEFAULT";

/// Source of variable values.
pub trait Environment {
  fn var(&self, name: &str) -> Maybe<String>;
}

/// The environment of this process.
#[derive(Copy, Clone, Debug)]
pub struct ProcessEnvironment;
impl Environment for ProcessEnvironment {
  #[inline]
  fn var(&self, name: &str) -> Maybe<String> { env::var(name) }
}

#[derive(Default, Clone, Debug)]
pub struct ProbeConfig {
  pub names: Vec<String>,
  pub default: Maybe<String>,
  pub allow_empty: bool,
  pub index: Maybe<usize>,
  pub required: Vec<String>,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Source {
  Environment,
  Default,
}

#[derive(Debug, Error)]
pub enum ProbeError {
  #[error("No name at index {index}; {len} name(s) given")]
  NoSuchName { index: usize, len: usize },
  #[error("Required variable(s) not set: {}", .0.join(", "))]
  Missing(Vec<String>),
  #[error("Writing output failed")]
  Write(#[from] io::Error),
}

pub struct Probe<E> {
  environment: E,
  config: ProbeConfig,
}

impl<E: Environment> Probe<E> {
  pub fn new(environment: E, config: ProbeConfig) -> Self {
    Self { environment, config }
  }

  /// Resolves `name` from the environment, then from the configured default, then from [`DEFAULT_VAR`]. Defaults are
  /// only looked up when the variable itself is absent.
  #[instrument(skip(self))]
  pub fn resolve(&self, name: &str) -> Maybe<(String, Source)> {
    let allow_empty = self.config.allow_empty;
    self.environment.var(name)
      .filter(|value| allow_empty || !value.is_empty())
      .inspect(|value| debug!(%value, "found in environment"))
      .map(|value| (value, Source::Environment))
      .or_else(|| {
        self.config.default.clone()
          .or_else(|| self.environment.var(DEFAULT_VAR).filter(|value| !value.is_empty()))
          .inspect(|value| debug!(%value, "using default"))
          .map(|value| (value, Source::Default))
      })
  }

  /// Names to resolve: all of them, or only the one at the configured index.
  pub fn selected_names(&self) -> Result<&[String], ProbeError> {
    let names = self.config.names.as_slice();
    self.config.index.map_or(Ok(names), |index| {
      Maybe::from_nullable(names.get(index))
        .map(std::slice::from_ref)
        .into_option()
        .ok_or(ProbeError::NoSuchName { index, len: names.len() })
    })
  }

  /// Required names that resolve to absent, whether or not they were selected.
  pub fn missing_required(&self) -> Vec<String> {
    self.config.required.iter()
      .filter(|name| self.resolve(name).is_absent())
      .cloned()
      .collect()
  }

  /// Resolves the selected names, writing one line per name to `out`, then fails if any required name is absent.
  pub fn run(&self, out: &mut impl Write) -> Result<(), ProbeError> {
    let names = self.selected_names()?;
    for name in names {
      let resolved = self.resolve(name);
      let line = resolved.as_ref().map_or_else(
        || format!("{name} is not set"),
        |(value, source)| match source {
          Source::Environment => format!("{name}={value}"),
          Source::Default => format!("{name}={value} (default)"),
        },
      );
      writeln!(out, "{line}")?;
    }
    let missing = self.missing_required();
    info!(resolved = names.len(), missing = missing.len(), "probe complete");

    if missing.is_empty() {
      Ok(())
    } else {
      Err(ProbeError::Missing(missing))
    }
  }
}


#[cfg(test)]
mod tests {
  use std::cell::Cell;
  use std::collections::HashMap;

  use maybe_core::present;

  use super::*;

  #[derive(Default)]
  struct MapEnvironment {
    vars: HashMap<&'static str, &'static str>,
    lookups: Cell<usize>,
  }
  impl MapEnvironment {
    fn new(vars: &[(&'static str, &'static str)]) -> Self {
      Self { vars: vars.iter().copied().collect(), lookups: Cell::new(0) }
    }
  }
  impl Environment for MapEnvironment {
    fn var(&self, name: &str) -> Maybe<String> {
      self.lookups.set(self.lookups.get() + 1);
      Maybe::from_nullable(self.vars.get(name)).map(|value| value.to_string())
    }
  }

  fn config_for(names: &[&str]) -> ProbeConfig {
    ProbeConfig { names: names.iter().map(|n| n.to_string()).collect(), ..ProbeConfig::default() }
  }

  fn run_to_string(probe: &Probe<MapEnvironment>) -> (Result<(), ProbeError>, String) {
    let mut out = Vec::new();
    let result = probe.run(&mut out);
    (result, String::from_utf8(out).unwrap())
  }

  #[test]
  fn present_variable_does_not_consult_defaults() {
    let probe = Probe::new(MapEnvironment::new(&[("HOME", "/root"), (DEFAULT_VAR, "x")]), config_for(&["HOME"]));
    assert_eq!(probe.resolve("HOME"), present(("/root".to_string(), Source::Environment)));
    assert_eq!(probe.environment.lookups.get(), 1);
  }

  #[test]
  fn configured_default_wins_over_default_var() {
    let mut config = config_for(&["MISSING"]);
    config.default = present("configured".to_string());
    let probe = Probe::new(MapEnvironment::new(&[(DEFAULT_VAR, "from env")]), config);
    assert_eq!(probe.resolve("MISSING"), present(("configured".to_string(), Source::Default)));
  }

  #[test]
  fn default_var_used_without_configured_default() {
    let probe = Probe::new(MapEnvironment::new(&[(DEFAULT_VAR, "from env")]), config_for(&["MISSING"]));
    assert_eq!(probe.resolve("MISSING"), present(("from env".to_string(), Source::Default)));
  }

  #[test]
  fn empty_values_are_absent_unless_allowed() {
    let probe = Probe::new(MapEnvironment::new(&[("EMPTY", "")]), config_for(&["EMPTY"]));
    assert!(probe.resolve("EMPTY").is_absent());

    let mut config = config_for(&["EMPTY"]);
    config.allow_empty = true;
    let probe = Probe::new(MapEnvironment::new(&[("EMPTY", "")]), config);
    assert_eq!(probe.resolve("EMPTY"), present((String::new(), Source::Environment)));
  }

  #[test]
  fn run_writes_one_line_per_name() {
    let mut config = config_for(&["A", "B"]);
    config.default = present("d".to_string());
    let probe = Probe::new(MapEnvironment::new(&[("A", "1")]), config);
    let (result, output) = run_to_string(&probe);
    assert!(result.is_ok());
    assert_eq!(output, "A=1\nB=d (default)\n");
  }

  #[test]
  fn missing_required_variable_fails_after_writing() {
    let mut config = config_for(&["A", "B"]);
    config.required = vec!["B".to_string()];
    let probe = Probe::new(MapEnvironment::new(&[("A", "1")]), config);
    let (result, output) = run_to_string(&probe);
    assert_eq!(output, "A=1\nB is not set\n");
    match result {
      Err(ProbeError::Missing(names)) => assert_eq!(names, vec!["B".to_string()]),
      other => panic!("expected missing error, got {other:?}"),
    }
  }

  #[test]
  fn required_names_are_checked_even_when_not_listed() {
    let mut config = config_for(&["A"]);
    config.required = vec!["B".to_string()];
    let probe = Probe::new(MapEnvironment::new(&[("A", "1")]), config);
    let (result, output) = run_to_string(&probe);
    assert_eq!(output, "A=1\n");
    assert!(matches!(result, Err(ProbeError::Missing(names)) if names == vec!["B".to_string()]));
  }

  #[test]
  fn required_names_are_checked_even_when_skipped_by_index() {
    let mut config = config_for(&["A", "B"]);
    config.index = present(0);
    config.required = vec!["A".to_string(), "B".to_string()];
    let probe = Probe::new(MapEnvironment::new(&[("A", "1")]), config);
    let (result, output) = run_to_string(&probe);
    assert_eq!(output, "A=1\n");
    assert!(matches!(result, Err(ProbeError::Missing(names)) if names == vec!["B".to_string()]));
  }

  #[test]
  fn required_names_resolved_by_default_are_not_missing() {
    let mut config = config_for(&["A"]);
    config.required = vec!["B".to_string()];
    config.default = present("d".to_string());
    let probe = Probe::new(MapEnvironment::new(&[("A", "1")]), config);
    assert!(probe.missing_required().is_empty());
  }

  #[test]
  fn index_selects_a_single_name() {
    let mut config = config_for(&["A", "B"]);
    config.index = present(1);
    let probe = Probe::new(MapEnvironment::new(&[("B", "2")]), config);
    let (result, output) = run_to_string(&probe);
    assert!(result.is_ok());
    assert_eq!(output, "B=2\n");
  }

  #[test]
  fn out_of_range_index_fails() {
    let mut config = config_for(&["A"]);
    config.index = present(3);
    let probe = Probe::new(MapEnvironment::default(), config);
    assert!(matches!(probe.selected_names(), Err(ProbeError::NoSuchName { index: 3, len: 1 })));
  }
}
