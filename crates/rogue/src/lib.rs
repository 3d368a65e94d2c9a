//! Dynamic property objects: named value members and callable behavior members
//! resolved at runtime.
//!
//! ```
//! use rogue::{Member, Value, json, obj};
//!
//! let person = obj([
//!     ("first_name", Member::from("Clifton")),
//!     ("greet", Member::behavior(|args: &[Value]| {
//!         Value::from(format!("my name is {}", args[0].as_str().unwrap_or_default()))
//!     })),
//! ]);
//!
//! assert_eq!(person.get("first_name").unwrap(), "Clifton");
//! assert_eq!(person.call("greet", &[json!("Cliff")]).unwrap(), "my name is Cliff");
//! ```
#![warn(missing_docs)]

mod error;
mod loader;
mod member;
mod object;

#[cfg(test)]
mod test_object;

pub use error::{Error, Result, excerpt_at};
pub use loader::{Format, load_from_path};
pub use member::{Behavior, Member};
pub use object::{RogueObject, obj};
pub use serde_json::{Value, json};
