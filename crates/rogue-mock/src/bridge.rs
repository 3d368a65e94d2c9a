use std::rc::Rc;

use rogue::{Behavior, Value};

use crate::{Mock, Reply};

/// Wrap `mock` as a behavior that forwards every invocation to `mock.call(name, args)`.
///
/// Behaviors cannot fail, so a rejected call yields `null` and the failure is
/// reported by the next [`Mock::verify`]. A reply of the mock itself also yields `null`.
pub fn mock_behavior(mock: &Rc<Mock>, name: impl Into<String>) -> Behavior {
    let mock = Rc::clone(mock);
    let name = name.into();
    Behavior::new(move |args| match mock.call(&name, args) {
        Ok(Reply::Value(v)) => v,
        Ok(Reply::Mock(_)) => Value::Null,
        Err(err) => {
            mock.record_failure(err);
            Value::Null
        }
    })
}
