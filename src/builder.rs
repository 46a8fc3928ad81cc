use core::fmt;

use crate::config::{Config, ConfigError, Preset};
use crate::context::Context;
use crate::runner::Runner;
use crate::signals::Signals;

pub struct Builder<'a, C: Context> {
    context: Option<C>,
    signals: Option<&'a Signals>,
    config: Config,
}

impl<'a, C: Context> Builder<'a, C> {
    pub fn new() -> Self {
        Self {
            context: None,
            signals: None,
            config: Config::default(),
        }
    }

    pub fn with_context(mut self, ctx: C) -> Self {
        self.context = Some(ctx);
        self
    }

    pub fn with_signals(mut self, signals: &'a Signals) -> Self {
        self.signals = Some(signals);
        self
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn with_preset(self, preset: Preset) -> Self {
        self.with_config(preset.into())
    }

    pub fn build(self) -> Result<Runner<'a, C>, Error> {
        let context = self.context.ok_or(Error::MissingContext)?;
        let signals = self.signals.ok_or(Error::MissingSignals)?;
        self.config.validate().map_err(Error::Config)?;
        Ok(Runner::new(context, signals, self.config))
    }
}

impl<'a, C: Context> Default for Builder<'a, C> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    MissingContext,
    MissingSignals,
    Config(ConfigError),
}

impl Error {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Error::MissingContext => "Context not provided",
            Error::MissingSignals => "Signals not provided",
            Error::Config(err) => err.as_str(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
