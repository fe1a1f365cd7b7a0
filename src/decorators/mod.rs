//! Call-logging and none-guard wrappers.
//!
//! Rust has no decorators, so a wrapped function is a closure taking its
//! arguments as one value (a tuple, a `Vec`, or [`Kwargs`]) together with a
//! [`FnSignature`] naming the function and its parameters. Each wrapper has a
//! bare entry point using default options ([`call_log`], [`exit_on_none`]) and
//! a builder for configured options ([`CallLog`], [`ExitOnNone`]).
//!
//! # Example
//!
//! ```no_run
//! use call_log::decorators::{self, exit_on_none, CallLog, Kwargs};
//! use call_log::signature;
//!
//! let foo = CallLog::new()
//!     .description("POSTing to data catalog")
//!     .wrap(signature!(foo(x, test)), |call: Kwargs<(&str,)>| {
//!         call.get_str("test").map(str::len)
//!     });
//!
//! // POSTing to data catalog: foo(x=ad, test="asd")
//! foo.call(Kwargs::new(("ad",)).with("test", "asd"));
//!
//! // Guards compose with call logging
//! let load = exit_on_none(signature!(load(path)), |(path,): (&str,)| {
//!     std::fs::read_to_string(path).ok()
//! });
//! let logged = decorators::call_log(signature!(load(path)), move |args: (&str,)| load.call(args));
//! let _config = logged.call(("settings.toml",));
//! ```

pub mod call_log;
pub mod error;
pub mod exit_on_none;
pub mod signature;

// Re-export main types for convenience
pub use self::call_log::{call_log, CallLog, Logged, NO_DESCRIPTION};
pub use self::error::GuardError;
pub use self::exit_on_none::{exit_on_none, ExitOnNone, Guarded, DEFAULT_EXIT_DESCRIPTION, NONE_EXIT_CODE};
pub use self::signature::{collapse_whitespace, Arguments, FnSignature, Kwargs, RenderedCall, EXTRA_LOGS};
