//! Receipt numbers handed out on submission
//!
//! Format is `{year}.{six digits}`. Uniqueness is the store's concern; the
//! generators only produce well-formed candidates.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::DeclarationError;

const SEQUENCE_MODULUS: u32 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReceiptNumber {
    year: i32,
    sequence: u32,
}

impl ReceiptNumber {
    pub fn new(year: i32, sequence: u32) -> Self {
        Self {
            year,
            sequence: sequence % SEQUENCE_MODULUS,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }
}

impl fmt::Display for ReceiptNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:06}", self.year, self.sequence)
    }
}

impl FromStr for ReceiptNumber {
    type Err = DeclarationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DeclarationError::InvalidReceipt(s.to_string());
        let (year, sequence) = s.split_once('.').ok_or_else(invalid)?;
        if sequence.len() != 6 || !sequence.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        Ok(Self {
            year: year.parse().map_err(|_| invalid())?,
            sequence: sequence.parse().map_err(|_| invalid())?,
        })
    }
}

impl TryFrom<String> for ReceiptNumber {
    type Error = DeclarationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReceiptNumber> for String {
    fn from(receipt: ReceiptNumber) -> Self {
        receipt.to_string()
    }
}

/// Source of receipt numbers for a submission year
pub trait ReceiptNumberGenerator: Send + Sync {
    fn next(&self, year: i32) -> ReceiptNumber;
}

/// Uniformly random six-digit suffix
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomReceipts;

impl ReceiptNumberGenerator for RandomReceipts {
    fn next(&self, year: i32) -> ReceiptNumber {
        ReceiptNumber::new(year, rand::thread_rng().gen_range(0..SEQUENCE_MODULUS))
    }
}

/// Monotonic suffix, wrapping after 999999
#[derive(Debug, Default)]
pub struct SequentialReceipts {
    next: AtomicU32,
}

impl SequentialReceipts {
    pub fn starting_at(first: u32) -> Self {
        Self {
            next: AtomicU32::new(first),
        }
    }
}

impl ReceiptNumberGenerator for SequentialReceipts {
    fn next(&self, year: i32) -> ReceiptNumber {
        ReceiptNumber::new(year, self.next.fetch_add(1, Ordering::Relaxed))
    }
}
