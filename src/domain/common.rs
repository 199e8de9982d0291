//! Shared traits for ledger entries.

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Converts an entity into a user-facing display label, rendering amounts
/// with the caller's money format.
pub trait Displayable {
    fn display_label(&self, money: fn(f64) -> String) -> String;
}

/// Sums the amounts of any slice of amounted entries.
pub fn sum_amounts<T: Amounted>(items: &[T]) -> f64 {
    items.iter().map(Amounted::amount).sum()
}
