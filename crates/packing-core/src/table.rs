//! Fallible allocation for the solver's lookup tables.
//!
//! Both phases index a table by total, so its length follows the order. An
//! order that fits a `usize` can still need more memory than the process can
//! get; that must surface as an error, not a panic or an abort.

use thiserror::Error;

/// A lookup table could not be allocated.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("lookup table for totals up to {last} cannot be allocated")]
pub struct TableTooLarge {
    /// Largest index the table needed.
    pub last: usize,
}

/// A table covering indices `0..=last`, every entry set to `fill`.
pub(crate) fn filled<T: Clone>(last: usize, fill: T) -> Result<Vec<T>, TableTooLarge> {
    let too_large = TableTooLarge { last };
    let len = last.checked_add(1).ok_or(too_large)?;
    let mut table = Vec::new();
    table.try_reserve_exact(len).map_err(|_| too_large)?;
    table.resize(len, fill);
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_last_index() {
        let table = filled(4, 7u8).unwrap();
        assert_eq!(table, vec![7, 7, 7, 7, 7]);
    }

    #[test]
    fn unaddressable_length_is_an_error() {
        assert_eq!(
            filled(usize::MAX, false),
            Err(TableTooLarge { last: usize::MAX })
        );
        // Fits a usize, but exceeds isize::MAX bytes.
        assert_eq!(
            filled(usize::MAX / 2 + 1, 0usize),
            Err(TableTooLarge { last: usize::MAX / 2 + 1 })
        );
    }
}
