//! Merge policy: decide which saint to show first.
//!
//! Franciscan Media always wins when both sources succeed. Catholic Online's
//! saint is shown as a second saint only when its name differs. Names are
//! compared exactly, case included.

use crate::models::{Merged, SaintRecord};

/// Combine the Franciscan Media (`a`) and Catholic Online (`b`) results.
pub fn merge(a: Option<SaintRecord>, b: Option<SaintRecord>) -> Merged {
    match (a, b) {
        (None, None) => Merged::default(),
        (Some(only), None) | (None, Some(only)) => Merged {
            primary: Some(only),
            secondary: None,
        },
        (Some(a), Some(b)) if a.name == b.name => Merged {
            primary: Some(a),
            secondary: None,
        },
        (Some(a), Some(b)) => Merged {
            primary: Some(a),
            secondary: Some(b),
        },
    }
}
