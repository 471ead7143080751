// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed row comparators.
//!
//! Both comparators define an *ascending* order. Descending order is always
//! obtained by reversing an ascending sort, never by flipping a comparator.

use core::cmp::Ordering;

use crate::row::RowRecord;

/// Parses a leading base-10 integer the way markup-facing code expects.
///
/// Leading whitespace is skipped, an optional sign is accepted, and digits are
/// read until the first non-digit. Returns `None` if no digit was read.
/// Values outside `i64` saturate.
#[must_use]
pub fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let mut seen = false;
    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        let d = i64::from(b - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(d)
        } else {
            value.saturating_mul(10).saturating_add(d)
        };
    }
    seen.then_some(value)
}

/// Numeric comparison on `key`, ties broken on `tie_key`.
///
/// Both operands are parsed with [`parse_int`]. Two unparsable values are
/// equal; a single unparsable value orders below any number, so the
/// comparator stays a total order.
///
/// Equal numbers fall back to the textual `tie_key` values with the *later*
/// text ordering first (`b > a` wins). A missing tie value reads as empty.
#[must_use]
pub fn compare_numeric<K>(a: &RowRecord<K>, b: &RowRecord<K>, key: &str, tie_key: &str) -> Ordering {
    let an = a.key(key).and_then(|v| v.as_number());
    let bn = b.key(key).and_then(|v| v.as_number());
    let primary = match (an, bn) {
        (Some(x), Some(y)) => x.cmp(&y),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
    };
    primary.then_with(|| {
        let at = a.key(tie_key).map(|v| v.as_text()).unwrap_or_default();
        let bt = b.key(tie_key).map(|v| v.as_text()).unwrap_or_default();
        bt.cmp(&at)
    })
}

/// Case-insensitive textual comparison on `key`. A missing value reads as empty.
#[must_use]
pub fn compare_lexicographic<K>(a: &RowRecord<K>, b: &RowRecord<K>, key: &str) -> Ordering {
    let lower = |r: &RowRecord<K>| {
        r.key(key)
            .map(|v| v.as_text().to_lowercase())
            .unwrap_or_default()
    };
    lower(a).cmp(&lower(b))
}
