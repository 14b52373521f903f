//! Math - anti-bot arithmetic questions
//!
//! Forms sometimes gate submission behind "2 + 3 = ?". This module extracts
//! and evaluates such expressions, and converts between numerals so the
//! answer can be found among option texts written as digits, Korean or English.
//!
//! ## Flow
//! 1. `is_math_question` / `extract_expression`: question markers, then the longest
//!    `digits op digits` run
//! 2. `evaluate`: recursive-descent parse, rounded to two decimals
//! 3. `result_variants` / `extract_number_from_option`: line the answer up with options

mod numerals;
mod solver;

pub use numerals::{
    english_numeral_value, extract_number_from_option, format_result, korean_numeral_value,
    number_to_variants, result_variants, text_to_number,
};
pub use solver::{evaluate, extract_and_calculate, extract_expression, is_math_question};
