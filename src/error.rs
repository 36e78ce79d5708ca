//! Error formatting helpers

use std::error::Error as StdError;

/// Render an error followed by its sources, e.g. `error sending request: operation timed out`.
///
/// Sources whose text is already part of the message are skipped.
pub fn describe_error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}
