//! Test support for stubbing chained calls on a mock and verifying them afterwards.
//!
//! ```
//! use rogue_mock::{Mock, expect_chained_call};
//! use serde_json::json;
//!
//! let mock = Mock::new();
//! expect_chained_call(&mock, "foo.bar.baz", json!(true), vec![]).unwrap();
//! let reply = mock
//!     .call("foo", &[])
//!     .and_then(|r| r.call("bar", &[]))
//!     .and_then(|r| r.call("baz", &[]))
//!     .unwrap();
//! assert_eq!(reply.value(), Some(json!(true)));
//! mock.verify().unwrap();
//! ```
#![warn(missing_docs)]

mod bridge;
mod chain;
mod context;
mod error;
mod mock;

pub use bridge::mock_behavior;
pub use chain::{expect_chained_call, expect_chained_call_with};
pub use context::{MockContext, with_new_mock};
pub use error::MockError;
pub use mock::{Mock, Reply, Returns};
