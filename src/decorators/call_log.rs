//! Call-logging wrapper.
//!
//! Each call emits a line with the rendered arguments before the wrapped
//! function runs, and either a success line or an exception line afterwards.

use crate::decorators::signature::{Arguments, FnSignature, RenderedCall};
use crate::observability::{LoggerSource, Severity};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Text used in place of a missing description.
pub const NO_DESCRIPTION: &str = "None";

/// Options for call logging, and the builder for [`Logged`] wrappers.
///
/// # Example
///
/// ```no_run
/// use call_log::decorators::CallLog;
/// use call_log::signature;
///
/// let add = CallLog::new()
///     .description("adding")
///     .wrap(signature!(add(a, b)), |(a, b): (i32, i32)| a + b);
///
/// // adding: add(a=1, b=2)
/// // adding: add(a=1, b=2) completed successfully!
/// assert_eq!(add.call((1, 2)), 3);
/// ```
#[derive(Debug, Clone)]
pub struct CallLog {
    description: Option<String>,
    trim: bool,
    level: Severity,
    logger: LoggerSource,
}

impl Default for CallLog {
    fn default() -> Self {
        Self {
            description: None,
            trim: true,
            level: Severity::Info,
            logger: LoggerSource::Default,
        }
    }
}

impl CallLog {
    /// Default options: no description, trimming on, INFO, default logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Label prefixed to every line.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Collapse whitespace runs in argument values.
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Severity of the before and after lines.
    ///
    /// Accepts a [`Severity`] or a level name; unknown names mean INFO.
    pub fn level(mut self, level: impl Into<Severity>) -> Self {
        self.level = level.into();
        self
    }

    /// Use an explicit logger handle or provider.
    pub fn logger(mut self, logger: impl Into<LoggerSource>) -> Self {
        self.logger = logger.into();
        self
    }

    /// Label used in lines, `None` when no description was set.
    pub fn description_label(&self) -> &str {
        self.description.as_deref().unwrap_or(NO_DESCRIPTION)
    }

    /// Whether argument whitespace is collapsed.
    pub fn trims(&self) -> bool {
        self.trim
    }

    /// Configured severity.
    pub fn severity(&self) -> Severity {
        self.level
    }

    /// Wrap `func` so every call through the wrapper is logged.
    pub fn wrap<F>(self, signature: FnSignature, func: F) -> Logged<F> {
        Logged {
            options: self,
            signature,
            func,
        }
    }

    /// Run `func(args)` once with call logging.
    ///
    /// A panic inside `func` is logged and then resumed with the same payload.
    pub fn run<A, R>(&self, signature: &FnSignature, args: A, func: impl FnOnce(A) -> R) -> R
    where
        A: Arguments,
    {
        self.invoke(signature, args, func, |_| None)
    }

    /// Run a fallible `func(args)` once with call logging.
    ///
    /// An `Err` is logged as an exception and returned unchanged; a panic is
    /// handled as in [`CallLog::run`].
    pub fn try_run<A, T, E>(
        &self,
        signature: &FnSignature,
        args: A,
        func: impl FnOnce(A) -> Result<T, E>,
    ) -> Result<T, E>
    where
        A: Arguments,
        E: fmt::Display,
    {
        self.invoke(signature, args, func, |result: &Result<T, E>| {
            result.as_ref().err().map(|e| e.to_string())
        })
    }

    fn invoke<A, R>(
        &self,
        signature: &FnSignature,
        mut args: A,
        func: impl FnOnce(A) -> R,
        failure: impl FnOnce(&R) -> Option<String>,
    ) -> R
    where
        A: Arguments,
    {
        let name = signature.name();
        let logger = self.logger.resolve(name);

        if self.trim {
            args.collapse_whitespace();
        }
        let rendered = RenderedCall::new(signature, &args, self.trim);
        let call_line = format!(
            "{}{}: {}({})",
            rendered.extra,
            self.description_label(),
            name,
            rendered.signature
        );
        logger.log(self.level, &call_line);

        match panic::catch_unwind(AssertUnwindSafe(move || func(args))) {
            Ok(result) => {
                match failure(&result) {
                    Some(message) => logger.exception(&exception_line(name, &message)),
                    None => logger.log(self.level, &format!("{} completed successfully!", call_line)),
                }
                result
            }
            Err(payload) => {
                logger.exception(&exception_line(name, &panic_message(payload.as_ref())));
                panic::resume_unwind(payload)
            }
        }
    }
}

fn exception_line(function: &str, message: &str) -> String {
    format!("Exception raised in '{}': {}", function, message)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// A function wrapped with call logging.
///
/// [`Logged::call`] takes `&self` and needs an `Fn`; a closure that mutates
/// captured state goes through [`Logged::call_mut`] instead.
#[derive(Clone)]
pub struct Logged<F> {
    options: CallLog,
    signature: FnSignature,
    func: F,
}

impl<F> Logged<F> {
    /// Call the wrapped function.
    pub fn call<A, R>(&self, args: A) -> R
    where
        F: Fn(A) -> R,
        A: Arguments,
    {
        self.options.run(&self.signature, args, &self.func)
    }

    /// Call a wrapped `FnMut`, which may update state it captured.
    pub fn call_mut<A, R>(&mut self, args: A) -> R
    where
        F: FnMut(A) -> R,
        A: Arguments,
    {
        self.options.run(&self.signature, args, &mut self.func)
    }

    /// Call a wrapped function that returns a `Result`; `Err` is logged.
    pub fn try_call<A, T, E>(&self, args: A) -> Result<T, E>
    where
        F: Fn(A) -> Result<T, E>,
        A: Arguments,
        E: fmt::Display,
    {
        self.options.try_run(&self.signature, args, &self.func)
    }

    /// Signature of the wrapped function.
    pub fn signature(&self) -> &FnSignature {
        &self.signature
    }

    /// Options this wrapper logs with.
    pub fn options(&self) -> &CallLog {
        &self.options
    }
}

impl<F> fmt::Debug for Logged<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logged")
            .field("options", &self.options)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Wrap `func` with call logging using default options.
pub fn call_log<F>(signature: FnSignature, func: F) -> Logged<F> {
    CallLog::default().wrap(signature, func)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorators::Kwargs;
    use crate::observability::{build_subscriber, Logger, MemoryWriter};
    use tracing_subscriber::EnvFilter;

    fn capture<R>(run: impl FnOnce() -> R) -> (R, Vec<String>) {
        let writer = MemoryWriter::new();
        let subscriber = build_subscriber(EnvFilter::new("debug"), writer.clone());
        let result = tracing::subscriber::with_default(subscriber, run);
        (result, writer.lines())
    }

    #[test]
    fn test_before_and_after_lines() {
        let add = CallLog::new()
            .description("adding")
            .wrap(crate::signature!(add(a, b)), |(a, b): (i32, i32)| a + b);

        let (sum, lines) = capture(|| add.call((1, 2)));

        assert_eq!(sum, 3);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("INFO     adding: add(a=1, b=2)"));
        assert!(lines[1].ends_with("INFO     adding: add(a=1, b=2) completed successfully!"));
    }

    #[test]
    fn test_bare_form_uses_none_description() {
        let double = call_log(crate::signature!(double(n)), |(n,): (u32,)| n * 2);
        let (value, lines) = capture(|| double.call((21,)));

        assert_eq!(value, 42);
        assert!(lines[0].ends_with("INFO     None: double(n=21)"));
        assert!(lines[1].ends_with("None: double(n=21) completed successfully!"));
    }

    #[test]
    fn test_configured_level() {
        let noop = CallLog::new()
            .level("warning")
            .wrap(crate::signature!(noop()), |(): ()| ());
        let (_, lines) = capture(|| noop.call(()));
        assert!(lines.iter().all(|line| line.contains("WARNING  None: noop()")));

        let unknown = CallLog::new().level("LOUD");
        assert_eq!(unknown.severity(), Severity::Info);
    }

    #[test]
    fn test_err_is_logged_and_returned_unchanged() {
        let parse = CallLog::new()
            .description("parsing")
            .wrap(crate::signature!(parse(text)), |(text,): (&str,)| {
                text.parse::<i32>()
            });

        let (result, lines) = capture(|| parse.try_call(("x1",)));

        let err = result.unwrap_err();
        assert_eq!(err, "x1".parse::<i32>().unwrap_err());
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("parsing: parse(text=x1)"));
        assert!(lines[1].ends_with(&format!(
            "ERROR    Exception raised in 'parse': {}",
            err
        )));
    }

    #[test]
    fn test_ok_result_logs_success() {
        let parse = call_log(crate::signature!(parse(text)), |(text,): (&str,)| {
            text.parse::<i32>()
        });
        let (result, lines) = capture(|| parse.try_call(("12",)));
        assert_eq!(result, Ok(12));
        assert!(lines[1].ends_with("completed successfully!"));
    }

    #[test]
    fn test_panic_is_logged_and_resumed() {
        let explode = call_log(crate::signature!(explode(code)), |(code,): (i32,)| -> i32 {
            panic!("boom {}", code)
        });

        let (outcome, lines) = capture(|| {
            panic::catch_unwind(AssertUnwindSafe(|| explode.call((7,))))
        });

        let payload = outcome.unwrap_err();
        assert_eq!(payload.downcast_ref::<String>().map(String::as_str), Some("boom 7"));
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("None: explode(code=7)"));
        assert!(lines[1].ends_with("ERROR    Exception raised in 'explode': boom 7"));
    }

    #[test]
    fn test_trim_reaches_wrapped_function() {
        let echo = CallLog::new().wrap(
            crate::signature!(echo(x)),
            |call: Kwargs<(i32,)>| call.get_str("body").map(str::to_string),
        );

        let (body, lines) = capture(|| echo.call(Kwargs::new((1,)).with("body", "a    b")));
        assert_eq!(body.as_deref(), Some("a b"));
        assert!(lines[0].ends_with(r#"None: echo(x=1, body="a b")"#));
    }

    #[test]
    fn test_call_mut_updates_captured_state() {
        let mut seen = Vec::new();
        let mut record = call_log(crate::signature!(record(id)), |(id,): (u32,)| {
            seen.push(id);
            seen.len()
        });

        let (counts, lines) = capture(|| (record.call_mut((4,)), record.call_mut((9,))));
        drop(record);

        assert_eq!(counts, (1, 2));
        assert_eq!(seen, vec![4, 9]);
        assert_eq!(lines.len(), 4);
        assert!(lines[2].ends_with("None: record(id=9)"));
    }

    #[test]
    fn test_explicit_logger_handle() {
        let logger = Logger::new(Some("audit"));
        let options = CallLog::new().logger(logger.clone());
        assert!(matches!(options.logger, LoggerSource::Handle(ref l) if *l == logger));

        let (_, lines) = capture(|| options.run(&crate::signature!(step()), (), |()| ()));
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_panic_message_variants() {
        assert_eq!(panic_message(&"static"), "static");
        assert_eq!(panic_message(&String::from("owned")), "owned");
        assert_eq!(panic_message(&5_u8), "non-string panic payload");
    }
}
