use std::{fmt, rc::Rc};

use serde_json::Value;

/// Signature shared by every behavior member.
type BehaviorFn = dyn Fn(&[Value]) -> Value;

/// Opaque, reference-counted callable registered as a behavior member.
///
/// Cloning a `Behavior` shares the underlying closure; it is never copied.
#[derive(Clone)]
pub struct Behavior {
    /// The registered closure.
    func: Rc<BehaviorFn>,
}

impl Behavior {
    /// Wrap a closure taking the forwarded arguments and returning a value.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Self {
            func: Rc::new(func),
        }
    }

    /// Invoke the closure with `args`.
    pub fn invoke(&self, args: &[Value]) -> Value {
        (self.func)(args)
    }

    /// Whether two behaviors share the same closure.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Behavior").finish_non_exhaustive()
    }
}

/// Initializer for one member passed to [`crate::RogueObject::with_properties`].
///
/// The variant decides the member kind at registration time.
#[derive(Debug, Clone)]
pub enum Member {
    /// Plain stored value, read and written by name.
    Value(Value),
    /// Callable invoked by name with forwarded arguments.
    Behavior(Behavior),
}

impl Member {
    /// Build a value initializer from anything convertible into a [`Value`].
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    /// Build a behavior initializer from a closure.
    pub fn behavior<F>(func: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Self::Behavior(Behavior::new(func))
    }

    /// Whether this initializer registers a behavior member.
    pub fn is_behavior(&self) -> bool {
        matches!(self, Self::Behavior(_))
    }
}

impl From<Behavior> for Member {
    fn from(value: Behavior) -> Self {
        Self::Behavior(value)
    }
}

impl From<Value> for Member {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// Scalar conversions routed through `serde_json::Value`.
macro_rules! member_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Member {
                fn from(value: $ty) -> Self {
                    Self::Value(Value::from(value))
                }
            }
        )*
    };
}

member_from_scalar!(&str, String, bool, i32, i64, u32, u64, f64);
