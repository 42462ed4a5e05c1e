//! Top-K selection by balance
//!
//! [`top_k`] keeps a min-heap of at most `k` candidates while scanning the
//! accounts once, so it runs in O(n log k) and never holds more than `k + 1`
//! entries. Equal balances keep insertion order: the account that was created
//! first ranks higher.

use crate::types::Account;
use rust_decimal::Decimal;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Heap entry: a balance plus the account's position in the input slice
#[derive(Debug, PartialEq, Eq)]
struct Ranked {
    balance: Decimal,
    position: usize,
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.balance
            .cmp(&other.balance)
            // Earlier position ranks higher on ties
            .then_with(|| other.position.cmp(&self.position))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Return up to `k` accounts ordered by descending balance
///
/// The result has length `min(k, accounts.len())`; `k == 0` yields nothing.
pub fn top_k(accounts: &[Account], k: usize) -> Vec<&Account> {
    if k == 0 {
        return Vec::new();
    }

    let mut heap = BinaryHeap::with_capacity(k.min(accounts.len()) + 1);
    for (position, account) in accounts.iter().enumerate() {
        heap.push(Reverse(Ranked {
            balance: account.balance,
            position,
        }));
        if heap.len() > k {
            heap.pop();
        }
    }

    // Ascending order of Reverse<Ranked> is descending order of Ranked
    heap.into_sorted_vec()
        .into_iter()
        .map(|Reverse(ranked)| &accounts[ranked.position])
        .collect()
}

/// Every account ordered by descending balance, ties in insertion order
///
/// Full stable sort; the baseline [`top_k`] is measured against.
pub fn sorted_by_balance(accounts: &[Account]) -> Vec<&Account> {
    let mut sorted: Vec<&Account> = accounts.iter().collect();
    sorted.sort_by(|a, b| b.balance.cmp(&a.balance));
    sorted
}
