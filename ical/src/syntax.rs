// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Content-line syntax: unfolding physical lines, lexing and scanning
//! logical lines into name/parameter/value triples.
//!
//! ```text
//! Byte Stream → Unfolder → Logical Lines → Lexer → Tokens → Scanner → Content Lines
//! ```

pub mod lexer;
pub mod scanner;
pub mod unfold;

pub use crate::syntax::scanner::{ContentLine, ContentLineError, ParameterErrorKind, scan_content_line};
pub use crate::syntax::unfold::{LogicalLine, Unfolder, unfold_str};
