//! Expectations for fluent call chains such as `mock.foo.bar.baz`.

use serde_json::Value;

use crate::{Mock, MockError, Returns};

/// Split `chain` into its leading segments and its final segment.
fn split_chain(chain: &str) -> Result<(Vec<&str>, &str), MockError> {
    let segments: Vec<&str> = chain.split('.').map(str::trim).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(MockError::InvalidChain {
            chain: chain.to_string(),
        });
    }
    match segments.split_last() {
        Some((last, leading)) => Ok((leading.to_vec(), *last)),
        None => Err(MockError::InvalidChain {
            chain: chain.to_string(),
        }),
    }
}

/// Expect each leading segment to return the mock, and the last one to be called with `args`
/// and return `returns`.
pub fn expect_chained_call(
    mock: &Mock,
    chain: &str,
    returns: impl Into<Returns>,
    args: Vec<Value>,
) -> Result<(), MockError> {
    let (leading, last) = split_chain(chain)?;
    for segment in leading {
        mock.expect(segment, Returns::Mock, Vec::new());
    }
    mock.expect(last, returns, args);
    Ok(())
}

/// Like [`expect_chained_call`], but the final call's arguments are validated by `check`.
pub fn expect_chained_call_with<F>(
    mock: &Mock,
    chain: &str,
    returns: impl Into<Returns>,
    check: F,
) -> Result<(), MockError>
where
    F: Fn(&[Value]) -> bool + Send + Sync + 'static,
{
    let (leading, last) = split_chain(chain)?;
    for segment in leading {
        mock.expect(segment, Returns::Mock, Vec::new());
    }
    mock.expect_with(last, returns, check);
    Ok(())
}
