//! Deferred verification scope: write the exercise first, the expectations later.

use crate::{Mock, MockError};

/// Holds an exercise block until expectations are supplied.
pub struct MockContext<F> {
    /// Code under test, run against a fresh mock.
    block: F,
}

/// Capture `block` for a later [`MockContext::verify_the_mock`].
pub fn with_new_mock<F>(block: F) -> MockContext<F>
where
    F: FnOnce(&Mock) -> Result<(), MockError>,
{
    MockContext { block }
}

impl<F> MockContext<F>
where
    F: FnOnce(&Mock) -> Result<(), MockError>,
{
    /// Record expectations with `setup`, run the captured block, then verify the mock.
    pub fn verify_the_mock<S>(self, setup: S) -> Result<(), MockError>
    where
        S: FnOnce(&Mock),
    {
        let mock = Mock::new();
        setup(&mock);
        (self.block)(&mock)?;
        mock.verify()
    }

    /// Run the captured block against a mock with no expectations, then verify it.
    pub fn verify(self) -> Result<(), MockError> {
        self.verify_the_mock(|_| {})
    }
}
