// Diagnostics sink passed into disassemble/assemble
// Reporting only: nothing recorded here changes the bytes produced.

use std::fmt;
use tracing::{debug, info, trace, warn};

/// Graded reporting level, 0 (quiet) to 4 (every field)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    Quiet = 0,
    #[default]
    Warnings = 1,
    Sections = 2,
    Records = 3,
    Fields = 4,
}

impl Verbosity {
    /// Levels above 4 clamp to `Fields`
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => Verbosity::Quiet,
            1 => Verbosity::Warnings,
            2 => Verbosity::Sections,
            3 => Verbosity::Records,
            _ => Verbosity::Fields,
        }
    }

    /// Default `tracing` directive matching this level
    pub fn filter_directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Warnings => "warn",
            Verbosity::Sections => "info",
            Verbosity::Records => "debug",
            Verbosity::Fields => "trace",
        }
    }
}

/// A recovered local-field problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub context: String,
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    verbosity: Verbosity,
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            warnings: Vec::new(),
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Record a warning; it is always kept, and logged unless quiet
    pub fn warn(&mut self, context: impl Into<String>, message: impl Into<String>) {
        let warning = Warning {
            context: context.into(),
            message: message.into(),
        };
        if self.verbosity >= Verbosity::Warnings {
            warn!("{}", warning);
        }
        self.warnings.push(warning);
    }

    pub fn section(&self, message: impl fmt::Display) {
        if self.verbosity >= Verbosity::Sections {
            info!("{}", message);
        }
    }

    pub fn record(&self, message: impl fmt::Display) {
        if self.verbosity >= Verbosity::Records {
            debug!("{}", message);
        }
    }

    pub fn field(&self, message: impl fmt::Display) {
        if self.verbosity >= Verbosity::Fields {
            trace!("{}", message);
        }
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(Verbosity::from_level(0), Verbosity::Quiet);
        assert_eq!(Verbosity::from_level(3), Verbosity::Records);
        assert_eq!(Verbosity::from_level(9), Verbosity::Fields);
        assert!(Verbosity::Fields > Verbosity::Warnings);
        assert_eq!(Verbosity::Sections.filter_directive(), "info");
        assert_eq!(Verbosity::default(), Verbosity::Warnings);
    }

    #[test]
    fn test_warnings_are_recorded_when_quiet() {
        let mut diag = Diagnostics::new(Verbosity::Quiet);
        diag.warn("Contacts[3]", "Call type: unrecognized value 0x07");
        assert!(diag.has_warnings());
        assert_eq!(
            diag.warnings()[0].to_string(),
            "Contacts[3]: Call type: unrecognized value 0x07"
        );

        let taken = diag.take_warnings();
        assert_eq!(taken.len(), 1);
        assert!(!diag.has_warnings());
    }
}
