//! Function signatures, call arguments and their rendering.

use regex::Regex;
use serde_json::Value;
use std::fmt::Debug;
use std::sync::LazyLock;

/// Argument name whose value prefixes every line of an instrumented call.
pub const EXTRA_LOGS: &str = "extra_logs";

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s\s+").expect("whitespace pattern is valid"));

/// Name and declared parameter names of an instrumented function.
///
/// Usually built with the [`signature!`](crate::signature) macro:
///
/// ```
/// use call_log::signature;
///
/// let sig = signature!(upload(bucket, key));
/// assert_eq!(sig.name(), "upload");
/// assert_eq!(sig.params(), &["bucket", "key"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FnSignature {
    name: &'static str,
    params: &'static [&'static str],
}

impl FnSignature {
    /// Create a signature from a function name and its parameter names.
    pub const fn new(name: &'static str, params: &'static [&'static str]) -> Self {
        Self { name, params }
    }

    /// Function name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared parameter names, in order.
    pub fn params(&self) -> &'static [&'static str] {
        self.params
    }
}

/// Build a [`FnSignature`] from `name(param, ...)`.
#[macro_export]
macro_rules! signature {
    ($name:ident ( $($param:ident),* $(,)? )) => {
        $crate::decorators::FnSignature::new(stringify!($name), &[$(stringify!($param)),*])
    };
}

/// Arguments of an instrumented call.
///
/// Implemented for tuples of `Debug` values (positional arguments), for
/// `Vec<T>` (variadic positional arguments) and for [`Kwargs`], which adds
/// named keyword values on top of positional ones.
pub trait Arguments {
    /// `Debug` rendering of each positional value, in call order.
    fn positional(&self) -> Vec<String>;

    /// Keyword values, in the order they were given.
    fn keywords(&self) -> &[(String, Value)] {
        &[]
    }

    /// Collapse whitespace runs in string keyword values.
    ///
    /// Called before the wrapped function runs when trimming is enabled, so
    /// the function receives the normalized values.
    fn collapse_whitespace(&mut self) {}
}

impl Arguments for () {
    fn positional(&self) -> Vec<String> {
        Vec::new()
    }
}

impl<T: Debug> Arguments for Vec<T> {
    fn positional(&self) -> Vec<String> {
        self.iter().map(|value| format!("{:?}", value)).collect()
    }
}

macro_rules! impl_tuple_arguments {
    ($($idx:tt $name:ident),+) => {
        impl<$($name: Debug),+> Arguments for ($($name,)+) {
            fn positional(&self) -> Vec<String> {
                vec![$(format!("{:?}", self.$idx)),+]
            }
        }
    };
}

impl_tuple_arguments!(0 A);
impl_tuple_arguments!(0 A, 1 B);
impl_tuple_arguments!(0 A, 1 B, 2 C);
impl_tuple_arguments!(0 A, 1 B, 2 C, 3 D);
impl_tuple_arguments!(0 A, 1 B, 2 C, 3 D, 4 E);
impl_tuple_arguments!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F);
impl_tuple_arguments!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G);
impl_tuple_arguments!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H);

/// Positional arguments plus named keyword values.
///
/// The wrapped function receives the whole `Kwargs` and reads keyword values
/// back with [`Kwargs::get`].
///
/// ```
/// use call_log::decorators::Kwargs;
///
/// let call = Kwargs::new(("ad",)).with("test", "asd").with("retries", 3);
/// assert_eq!(call.args().0, "ad");
/// assert_eq!(call.get_str("test"), Some("asd"));
/// assert_eq!(call.get("retries"), Some(&serde_json::json!(3)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Kwargs<P> {
    args: P,
    keywords: Vec<(String, Value)>,
}

impl<P> Kwargs<P> {
    /// Wrap positional arguments with no keywords yet.
    pub fn new(args: P) -> Self {
        Self {
            args,
            keywords: Vec::new(),
        }
    }

    /// Add a keyword value, replacing an earlier one with the same name.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.keywords.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.keywords.push((name, value)),
        }
        self
    }

    /// Positional arguments.
    pub fn args(&self) -> &P {
        &self.args
    }

    /// Take the positional arguments out.
    pub fn into_args(self) -> P {
        self.args
    }

    /// Keyword value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.keywords
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// Keyword value by name, if it is a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }
}

impl<P: Arguments> Arguments for Kwargs<P> {
    fn positional(&self) -> Vec<String> {
        self.args.positional()
    }

    fn keywords(&self) -> &[(String, Value)] {
        &self.keywords
    }

    fn collapse_whitespace(&mut self) {
        self.args.collapse_whitespace();
        for (_, value) in &mut self.keywords {
            if let Value::String(text) = value {
                *text = collapse_whitespace(text);
            }
        }
    }
}

/// Rendered form of one call: the `name=value` list and the extra label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCall {
    /// `a=1, b=2, key="value"`
    pub signature: String,
    /// `"<extra_logs> - "`, or empty when there is no usable label.
    pub extra: String,
}

impl RenderedCall {
    /// Render `args` against the declared parameters of `signature`.
    ///
    /// Positional values are paired with parameter names by position; the
    /// pairing stops at whichever list is shorter.
    pub fn new<A>(signature: &FnSignature, args: &A, trim: bool) -> Self
    where
        A: Arguments + ?Sized,
    {
        let positional: Vec<(&str, String)> = signature
            .params()
            .iter()
            .copied()
            .zip(args.positional())
            .map(|(name, value)| {
                let value = strip_quotes(&value);
                let value = if trim { collapse_whitespace(&value) } else { value };
                (name, value)
            })
            .collect();

        let keywords = args.keywords();
        let parts: Vec<String> = positional
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .chain(
                keywords
                    .iter()
                    .map(|(name, value)| format!("{}={}", name, render_keyword(value, trim))),
            )
            .collect();

        Self {
            signature: parts.join(", "),
            extra: extra_label(&positional, keywords),
        }
    }
}

fn render_keyword(value: &Value, trim: bool) -> String {
    match value {
        Value::String(text) if trim => format!("{:?}", collapse_whitespace(text)),
        Value::String(text) => format!("{:?}", text),
        other => other.to_string(),
    }
}

/// Best-effort lookup of the `extra_logs` label; never fails.
fn extra_label(positional: &[(&str, String)], keywords: &[(String, Value)]) -> String {
    if let Some((_, value)) = keywords.iter().find(|(name, _)| name == EXTRA_LOGS) {
        // a non-string label is ignored
        return value
            .as_str()
            .map(|text| format!("{} - ", text))
            .unwrap_or_default();
    }

    positional
        .iter()
        .find(|(name, _)| *name == EXTRA_LOGS)
        .map(|(_, value)| format!("{} - ", value))
        .unwrap_or_default()
}

/// Replace every run of two or more whitespace characters with one space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

fn strip_quotes(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '\'' | '"')).collect()
}
