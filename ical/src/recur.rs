// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence expansion (RFC 5545 Sections 3.3.10 and 3.8.5).
//!
//! [`RecurrenceRule::recurrences`](crate::value::RecurrenceRule::recurrences)
//! expands one rule lazily; [`OccurrenceSet`] merges rules and explicit dates
//! into the final occurrence sequence of a component. Both are pure functions
//! of the rule, the anchor and a [`TzResolver`], and stop on COUNT, UNTIL,
//! year 9999 or an iteration limit on consecutive empty periods.

mod expand;
mod set;
mod timezone;

pub use expand::{DEFAULT_ITERATION_LIMIT, Recurrences};
pub use set::OccurrenceSet;
pub use timezone::{FixedOffset, Observance, ObservanceKind, TimeZoneRules, TzResolver};
