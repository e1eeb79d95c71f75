//! Advisory notices raised when a parameter departs from its tuned default.
//!
//! Deviations are informational only. Strategies report them through a
//! [`DiagnosticSink`] once per assignment and carry on.

use std::fmt;

/// A parameter was assigned a value other than its tuned default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDeviation {
    /// Parameter name, e.g. `wake_weight`.
    pub param: &'static str,
    /// The assigned value, formatted for display.
    pub value: String,
    /// The tuned default, formatted for display.
    pub tuned: String,
}

impl fmt::Display for ParamDeviation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Current value of {}, {}, is not equal to tuned value of {}.",
            self.param, self.value, self.tuned
        )
    }
}

/// Receiver for advisory notices.
pub trait DiagnosticSink {
    /// Records one deviation.
    fn advisory(&mut self, deviation: ParamDeviation);
}

/// Forwards every deviation to the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn advisory(&mut self, deviation: ParamDeviation) {
        log::info!("{deviation}");
    }
}

/// Collects deviations in memory.
impl DiagnosticSink for Vec<ParamDeviation> {
    fn advisory(&mut self, deviation: ParamDeviation) {
        self.push(deviation);
    }
}
