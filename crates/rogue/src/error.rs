//! Error types for member access, dispatch, and document loading.

use std::{
    cmp::{max, min},
    fmt::Write as _,
    path::{Path, PathBuf},
    result::Result as StdResult,
};

use serde_json::Value;
use thiserror::Error;

/// Convenient result type for the rogue crate.
pub type Result<T> = StdResult<T, Error>;

#[derive(Debug, Error, Clone)]
/// Errors produced by a [`crate::RogueObject`] or while loading one from a document.
pub enum Error {
    #[error("undefined member `{name}`")]
    /// A value read named a member that was never assigned and is not a behavior.
    UndefinedMember {
        /// Name that was read.
        name: String,
    },
    #[error("Method :{name} not defined with arguments {}", render_args(.args))]
    /// An invocation named a member that is not a registered behavior.
    Argument {
        /// Name that was invoked.
        name: String,
        /// Arguments supplied with the invocation.
        args: Vec<Value>,
    },
    #[error("member `{name}` is a behavior; invoke it with `call`")]
    /// A behavior member was read or assigned through the value API.
    BehaviorMember {
        /// Name of the behavior member.
        name: String,
    },
    #[error("member `{name}` has an unexpected shape: {message}")]
    /// A value member could not be deserialized into the requested type.
    Convert {
        /// Name of the value member.
        name: String,
        /// Deserializer message.
        message: String,
    },
    #[error("{message}")]
    /// I/O or filesystem read error.
    Read {
        /// Optional path associated with the read error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    #[error("{message}")]
    /// Document syntax error, with a location and excerpt when the parser reports one.
    Parse {
        /// Optional path associated with the parse error.
        path: Option<PathBuf>,
        /// Optional 1-based line number.
        line: Option<usize>,
        /// Optional 1-based column number.
        col: Option<usize>,
        /// Human-readable error message.
        message: String,
        /// Optional excerpt including a caret at the error location.
        excerpt: Option<String>,
    },
    #[error("{message}")]
    /// The document parsed but does not describe an object.
    Validation {
        /// Optional path associated with the validation error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
}

impl Error {
    /// Render a human-friendly error message including location and an excerpt when available.
    pub fn pretty(&self) -> String {
        match self {
            Self::Read { path, message } => match path {
                Some(p) => format!("Read error at {}: {}", p.display(), message),
                None => format!("Read error: {}", message),
            },
            Self::Parse {
                path,
                line,
                col,
                message,
                excerpt,
            } => {
                let loc = match (line, col) {
                    (Some(l), Some(c)) => format!("{}:{}", l, c),
                    (Some(l), None) => format!("{}", l),
                    _ => String::new(),
                };
                let head = match path {
                    Some(p) if !loc.is_empty() => format!("Parse error at {}:{}", p.display(), loc),
                    Some(p) => format!("Parse error at {}", p.display()),
                    None if !loc.is_empty() => format!("Parse error at {}", loc),
                    None => "Parse error".to_string(),
                };
                match excerpt {
                    Some(ex) => format!("{}\n{}\n{}", head, message, ex),
                    None => format!("{}\n{}", head, message),
                }
            }
            Self::Validation { path, message } => match path {
                Some(p) => format!("Validation error at {}\n{}", p.display(), message),
                None => format!("Validation error\n{}", message),
            },
            other => other.to_string(),
        }
    }

    /// Access the optional path attached to this error.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Validation { path, .. } => {
                path.as_deref()
            }
            _ => None,
        }
    }

    /// Attach `path` to a loader error that does not carry one yet.
    pub(crate) fn with_path(mut self, at: &Path) -> Self {
        if let Self::Read { path, .. } | Self::Parse { path, .. } | Self::Validation { path, .. } =
            &mut self
            && path.is_none()
        {
            *path = Some(at.to_path_buf());
        }
        self
    }
}

/// Render an argument list the way it was passed: `["x", 2]`.
pub(crate) fn render_args(args: &[Value]) -> String {
    let parts: Vec<String> = args.iter().map(Value::to_string).collect();
    format!("[{}]", parts.join(", "))
}

/// Build a small 2–3 line excerpt with a caret at `(line_no, col_no)`.
pub fn excerpt_at(source: &str, line_no: usize, col_no: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let total = lines.len();
    let start = max(1usize, line_no.saturating_sub(2));
    let end = min(total, line_no + 1);

    let mut out = String::new();
    for n in start..=end {
        let text = lines.get(n - 1).copied().unwrap_or("");
        let _ignored = writeln!(out, " {:>4} | {}", n, text);
        if n == line_no {
            let gutter = format!(" {:>4} | ", n);
            let _ignored = writeln!(
                out,
                "{}{}^",
                " ".repeat(gutter.len()),
                " ".repeat(col_no.saturating_sub(1))
            );
        }
    }
    out
}
