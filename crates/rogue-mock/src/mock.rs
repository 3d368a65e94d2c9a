//! Test double with per-method queues of expectations.

use std::{fmt, sync::Arc};

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{MockError, render_inline};

/// Argument predicate attached with [`Mock::expect_with`].
type CheckFn = dyn Fn(&[Value]) -> bool + Send + Sync;

/// What an expected call yields.
#[derive(Debug, Clone, PartialEq)]
pub enum Returns {
    /// The mock itself, so the caller can continue a chain.
    Mock,
    /// A plain value.
    Value(Value),
}

impl From<Value> for Returns {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl fmt::Display for Returns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mock => f.write_str("<mock>"),
            Self::Value(v) => write!(f, "{v}"),
        }
    }
}

/// How the arguments of an expected call are matched.
#[derive(Clone)]
enum ArgSpec {
    /// Arguments must equal these, in order.
    Exact(Vec<Value>),
    /// Any arguments are accepted.
    Any,
    /// A predicate decides.
    Check(Arc<CheckFn>),
}

impl fmt::Debug for ArgSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(args) => f.debug_tuple("Exact").field(args).finish(),
            Self::Any => f.write_str("Any"),
            Self::Check(_) => f.debug_tuple("Check").finish_non_exhaustive(),
        }
    }
}

impl ArgSpec {
    /// Argument rendering used in verification failures.
    fn describe(&self) -> String {
        match self {
            Self::Exact(args) => render_inline(args),
            Self::Any => "..".to_string(),
            Self::Check(_) => "<check>".to_string(),
        }
    }
}

/// One queued expectation.
#[derive(Debug, Clone)]
struct Expectation {
    /// Expected method name.
    name: String,
    /// Reply once the call matches.
    returns: Returns,
    /// Argument matcher.
    args: ArgSpec,
    /// Whether a call has already consumed this expectation.
    consumed: bool,
}

#[derive(Debug, Default)]
/// Shared mutable state of a [`Mock`].
struct MockState {
    /// Expectations in registration order.
    expected: Vec<Expectation>,
    /// Calls that matched an expectation, in call order.
    calls: Vec<(String, Vec<Value>)>,
    /// Failures swallowed by callers that cannot propagate them.
    failures: Vec<MockError>,
}

/// A test double: register expectations, exercise it, then [`verify`](Self::verify).
///
/// Expectations for the same method are consumed in registration order.
#[derive(Debug, Default)]
pub struct Mock {
    /// Expectations and call log.
    state: Mutex<MockState>,
}

/// Result of a successful [`Mock::call`].
#[derive(Debug)]
pub enum Reply<'a> {
    /// The call returned the mock itself.
    Mock(&'a Mock),
    /// The call returned a value.
    Value(Value),
}

impl Reply<'_> {
    /// Continue a chain by calling `name` on the returned mock.
    pub fn call(self, name: &str, args: &[Value]) -> Result<Self, MockError> {
        match self {
            Self::Mock(mock) => mock.call(name, args),
            Self::Value(_) => Err(MockError::NotChainable { name: name.into() }),
        }
    }

    /// The returned value, if the call did not return the mock.
    pub fn value(self) -> Option<Value> {
        match self {
            Self::Mock(_) => None,
            Self::Value(v) => Some(v),
        }
    }

    /// Whether the call returned the mock itself.
    pub fn is_mock(&self) -> bool {
        matches!(self, Self::Mock(_))
    }
}

impl Mock {
    /// Create a mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an expected call of `name` with exactly `args`.
    pub fn expect(
        &self,
        name: impl Into<String>,
        returns: impl Into<Returns>,
        args: Vec<Value>,
    ) -> &Self {
        self.push(name.into(), returns.into(), ArgSpec::Exact(args))
    }

    /// Queue an expected call of `name` accepting any arguments.
    pub fn expect_any_args(&self, name: impl Into<String>, returns: impl Into<Returns>) -> &Self {
        self.push(name.into(), returns.into(), ArgSpec::Any)
    }

    /// Queue an expected call of `name` whose arguments must satisfy `check`.
    pub fn expect_with<F>(
        &self,
        name: impl Into<String>,
        returns: impl Into<Returns>,
        check: F,
    ) -> &Self
    where
        F: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        self.push(name.into(), returns.into(), ArgSpec::Check(Arc::new(check)))
    }

    /// Append an expectation.
    fn push(&self, name: String, returns: Returns, args: ArgSpec) -> &Self {
        trace!(method = %name, ?args, %returns, "expect");
        self.state.lock().expected.push(Expectation {
            name,
            returns,
            args,
            consumed: false,
        });
        self
    }

    /// Call `name` with `args`, consuming the next matching expectation.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Reply<'_>, MockError> {
        let (index, spec, returns) = self.next_expectation(name, args)?;

        // The lock is released here; predicates may call back into the mock.
        let matched = match &spec {
            ArgSpec::Exact(expected) if expected.len() != args.len() => {
                Err(MockError::ArityMismatch {
                    name: name.into(),
                    expected: expected.len(),
                    args: args.to_vec(),
                })
            }
            ArgSpec::Exact(expected) if expected.as_slice() != args => {
                Err(MockError::UnexpectedArgs {
                    name: name.into(),
                    args: args.to_vec(),
                })
            }
            ArgSpec::Check(check) if !check(args) => Err(MockError::CheckFailed {
                name: name.into(),
                args: args.to_vec(),
            }),
            _ => Ok(()),
        };
        if let Err(err) = matched {
            debug!(method = %name, %err, "mock call rejected");
            return Err(err);
        }

        {
            let mut state = self.state.lock();
            if let Some(e) = state.expected.get_mut(index) {
                e.consumed = true;
            }
            state.calls.push((name.to_string(), args.to_vec()));
        }
        trace!(method = %name, argc = args.len(), "mock call matched");
        Ok(match returns {
            Returns::Mock => Reply::Mock(self),
            Returns::Value(v) => Reply::Value(v),
        })
    }

    /// Locate the first unconsumed expectation for `name`.
    fn next_expectation(
        &self,
        name: &str,
        args: &[Value],
    ) -> Result<(usize, ArgSpec, Returns), MockError> {
        let state = self.state.lock();
        if !state.expected.iter().any(|e| e.name == name) {
            let mut expected: Vec<String> = state.expected.iter().map(|e| e.name.clone()).collect();
            expected.dedup();
            debug!(method = %name, "unmocked method");
            return Err(MockError::Unmocked {
                name: name.into(),
                expected,
            });
        }
        state
            .expected
            .iter()
            .enumerate()
            .find(|(_, e)| e.name == name && !e.consumed)
            .map(|(i, e)| (i, e.args.clone(), e.returns.clone()))
            .ok_or_else(|| MockError::NoMoreExpects {
                name: name.into(),
                args: args.to_vec(),
            })
    }

    /// Check that every expectation was consumed and no swallowed failure was recorded.
    pub fn verify(&self) -> Result<(), MockError> {
        let state = self.state.lock();
        if let Some(err) = state.failures.first() {
            return Err(err.clone());
        }
        match state.expected.iter().find(|e| !e.consumed) {
            Some(e) => {
                let err = MockError::Unsatisfied {
                    name: e.name.clone(),
                    args: e.args.describe(),
                    returns: e.returns.to_string(),
                };
                debug!(%err, "mock verification failed");
                Err(err)
            }
            None => Ok(()),
        }
    }

    /// Record a failure that could not be returned to the caller; [`verify`](Self::verify)
    /// reports it.
    pub(crate) fn record_failure(&self, err: MockError) {
        self.state.lock().failures.push(err);
    }

    /// Matched calls so far, in call order.
    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.state.lock().calls.clone()
    }

    /// Whether a call to `name` has matched an expectation.
    pub fn calls_contains(&self, name: &str) -> bool {
        self.state.lock().calls.iter().any(|(n, _)| n == name)
    }
}
