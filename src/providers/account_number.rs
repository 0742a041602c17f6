use std::ops::Range;

use rand::Rng;

/// Account numbers are seven digits
pub const ACCOUNT_NUMBER_RANGE: Range<i64> = 1_000_000..10_000_000;

/// Source of candidate account numbers
///
/// Uniqueness is enforced by the store; a candidate may collide.
pub trait AccountNumberSource: Send + Sync {
    fn next_number(&self) -> i64;
}

/// Uniformly random account numbers
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomAccountNumbers;

impl AccountNumberSource for RandomAccountNumbers {
    fn next_number(&self) -> i64 {
        rand::rng().random_range(ACCOUNT_NUMBER_RANGE)
    }
}
