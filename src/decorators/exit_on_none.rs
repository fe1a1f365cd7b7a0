//! None-guard wrapper: a `None` result terminates the process.

use crate::decorators::error::GuardError;
use crate::decorators::signature::FnSignature;
use crate::observability::{LoggerSource, Severity};
use std::fmt;
use std::process;

/// Exit status used when a guarded function returns `None`.
pub const NONE_EXIT_CODE: i32 = 450;

/// Default label for none-guard lines.
pub const DEFAULT_EXIT_DESCRIPTION: &str = "EXITING";

/// Options for the none-guard, and the builder for [`Guarded`] wrappers.
///
/// # Example
///
/// ```no_run
/// use call_log::decorators::ExitOnNone;
/// use call_log::signature;
///
/// let lookup = ExitOnNone::new()
///     .description("catalog lookup")
///     .wrap(signature!(lookup(id)), |(id,): (u32,)| (id < 10).then_some(id));
///
/// assert_eq!(lookup.call((3,)), 3);
/// // logs "catalog lookup: 'lookup(...)' exitted with a None. ..." and exits with 450
/// lookup.call((42,));
/// ```
#[derive(Debug, Clone)]
pub struct ExitOnNone {
    description: String,
    level: Severity,
    logger: LoggerSource,
}

impl Default for ExitOnNone {
    fn default() -> Self {
        Self {
            description: DEFAULT_EXIT_DESCRIPTION.to_string(),
            level: Severity::Error,
            logger: LoggerSource::Default,
        }
    }
}

impl ExitOnNone {
    /// Default options: `EXITING`, ERROR, default logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Label prefixed to the exit line.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Severity of the exit line; unknown names mean INFO.
    pub fn level(mut self, level: impl Into<Severity>) -> Self {
        self.level = level.into();
        self
    }

    /// Use an explicit logger handle or provider.
    pub fn logger(mut self, logger: impl Into<LoggerSource>) -> Self {
        self.logger = logger.into();
        self
    }

    /// Wrap `func` so a `None` result ends the process.
    pub fn wrap<F>(self, signature: FnSignature, func: F) -> Guarded<F> {
        Guarded {
            options: self,
            signature,
            func,
        }
    }

    /// Inspect a result without logging or exiting.
    pub fn check<T>(&self, signature: &FnSignature, value: Option<T>) -> Result<T, GuardError> {
        value.ok_or_else(|| GuardError::none_returned(signature.name(), NONE_EXIT_CODE))
    }

    /// Line logged right before the process exits.
    pub fn exit_message(&self, function: &str) -> String {
        format!(
            "{}: '{}(...)' exitted with a None. Exiting with error code {}.",
            self.description, function, NONE_EXIT_CODE
        )
    }

    /// Run `func(args)` to completion; exit the process if it returned `None`.
    pub fn run<A, T>(&self, signature: &FnSignature, args: A, func: impl FnOnce(A) -> Option<T>) -> T {
        match self.check(signature, func(args)) {
            Ok(value) => value,
            Err(err) => self.exit(signature, &err),
        }
    }

    fn exit(&self, signature: &FnSignature, err: &GuardError) -> ! {
        let name = signature.name();
        self.logger
            .resolve(name)
            .log(self.level, &self.exit_message(name));
        process::exit(err.exit_code())
    }
}

/// A function whose `None` result terminates the process.
#[derive(Clone)]
pub struct Guarded<F> {
    options: ExitOnNone,
    signature: FnSignature,
    func: F,
}

impl<F> Guarded<F> {
    /// Call the wrapped function, returning the value inside `Some`.
    ///
    /// Does not return if the function produced `None`.
    pub fn call<A, T>(&self, args: A) -> T
    where
        F: Fn(A) -> Option<T>,
    {
        self.options.run(&self.signature, args, &self.func)
    }

    /// Signature of the wrapped function.
    pub fn signature(&self) -> &FnSignature {
        &self.signature
    }

    /// Options this wrapper exits with.
    pub fn options(&self) -> &ExitOnNone {
        &self.options
    }
}

impl<F> fmt::Debug for Guarded<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guarded")
            .field("options", &self.options)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Wrap `func` with the none-guard using default options.
pub fn exit_on_none<F>(signature: FnSignature, func: F) -> Guarded<F> {
    ExitOnNone::default().wrap(signature, func)
}
