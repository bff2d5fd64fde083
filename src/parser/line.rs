//! Line unfolding.
//!
//! A CRLF directly followed by a single space continues the previous
//! logical line. Unfolding drops that three byte sequence and nothing
//! else, so it runs once over the whole buffer before lexing.

use std::borrow::Cow;

const FOLD: &str = "\r\n ";

/// Collapse every folded continuation in `input`.
///
/// Borrows the input when there is nothing to unfold.
pub fn unfold(input: &str) -> Cow<'_, str> {
    if input.contains(FOLD) {
        Cow::Owned(input.replace(FOLD, ""))
    } else {
        Cow::Borrowed(input)
    }
}
