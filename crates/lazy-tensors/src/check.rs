// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Fatal contract checks.
//!
//! A failed check is a bug in the caller, not a runtime condition, so it is
//! never turned into a `Result`. The failure is logged through `tracing` and
//! then panics; release builds use `panic = "abort"` and terminate the
//! process.
//!
//! ```should_panic
//! use lazy_tensors::lt_check;
//!
//! let rank = 3;
//! lt_check!(rank < 2, "rank {rank} is too large");
//! ```

/// Reports a contract violation and never returns.
#[cold]
#[inline(never)]
#[track_caller]
pub fn fatal(message: &str) -> ! {
    let location = std::panic::Location::caller();
    tracing::error!(
        file = location.file(),
        line = location.line(),
        "{message}"
    );
    panic!("{message}")
}

/// Aborts the current operation with a formatted `Check failed:` message.
#[macro_export]
macro_rules! lt_fatal {
    ($($arg:tt)+) => {
        $crate::check::fatal(&::std::format!($($arg)+))
    };
}

/// Fatal assertion: `lt_check!(cond)` or `lt_check!(cond, "fmt", args..)`.
#[macro_export]
macro_rules! lt_check {
    ($cond:expr $(,)?) => {
        if !$cond {
            $crate::lt_fatal!("Check failed: {}", ::std::stringify!($cond));
        }
    };
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::lt_fatal!(
                "Check failed: {}: {}",
                ::std::stringify!($cond),
                ::std::format_args!($($arg)+)
            );
        }
    };
}

/// Fatal equality assertion printing both operands.
#[macro_export]
macro_rules! lt_check_eq {
    ($lhs:expr, $rhs:expr $(,)?) => {
        match (&$lhs, &$rhs) {
            (lhs, rhs) => {
                if !(*lhs == *rhs) {
                    $crate::lt_fatal!(
                        "Check failed: {} == {} ({:?} vs. {:?})",
                        ::std::stringify!($lhs),
                        ::std::stringify!($rhs),
                        lhs,
                        rhs
                    );
                }
            }
        }
    };
}
