use serde_json::Value;
use thiserror::Error;

/// Failures raised by a [`crate::Mock`] while stubbing, calling, or verifying.
#[derive(Debug, Error, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum MockError {
    /// The method was never expected on this mock.
    #[error("unmocked method :{name}, expected one of [{}]", .expected.join(", "))]
    Unmocked { name: String, expected: Vec<String> },

    /// Every expectation for the method has already been consumed.
    #[error("No more expects available for :{name}: {}", render_list(.args))]
    NoMoreExpects { name: String, args: Vec<Value> },

    /// The call supplied a different number of arguments than expected.
    #[error("mocked method :{name} expects {expected} arguments, got {}", render_list(.args))]
    ArityMismatch {
        name: String,
        expected: usize,
        args: Vec<Value>,
    },

    /// The call supplied arguments that differ from the expected ones.
    #[error("mocked method :{name} called with unexpected arguments {}", render_list(.args))]
    UnexpectedArgs { name: String, args: Vec<Value> },

    /// The argument predicate rejected the call.
    #[error("mocked method :{name} failed block w/ {}", render_list(.args))]
    CheckFailed { name: String, args: Vec<Value> },

    /// An expectation was never satisfied before verification.
    #[error("expected {name}({args}) => {returns}")]
    Unsatisfied {
        name: String,
        args: String,
        returns: String,
    },

    /// A value reply cannot continue a call chain.
    #[error("cannot call :{name} on a value reply")]
    NotChainable { name: String },

    /// The chain specification has an empty segment.
    #[error("invalid chain specification '{chain}'")]
    InvalidChain { chain: String },
}

/// Render values as a bracketed list: `[1, "two"]`.
pub(crate) fn render_list(args: &[Value]) -> String {
    format!("[{}]", render_inline(args))
}

/// Render values comma separated, without brackets.
pub(crate) fn render_inline(args: &[Value]) -> String {
    args.iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
