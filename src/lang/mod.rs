//! # Language Module
//!
//! Conversion between listing text and the tokenized program the machine keeps in memory.
//! The keyword table is in `dictionary`, the packed line number operand is in `linenum`,
//! and the two directions of conversion are in `tokenizer` and `detokenizer`.
//!
//! The in-memory program is a `0x0D` followed by line records, terminated by `0xFF`:
//! `0D hi lo [len] body ... 0D FF`.  The length byte is present only in the BBC dialect.

mod token_maps;
pub mod dictionary;
pub mod linenum;
pub mod tokenizer;
pub mod detokenizer;
#[cfg(test)]
mod tokenize_test;

use std::fmt::Write;
use thiserror::Error;
use log::error;

/// Separates line records in memory
pub const CR: u8 = 0x0D;
/// Takes the place of the high byte of a line number after the last line
pub const END_MARKER: u8 = 0xFF;
/// Highest line number either dialect can store
pub const MAX_LINE_NUMBER: u16 = 32767;

#[derive(Error,Debug,PartialEq)]
pub enum Error {
    #[error("line number out of range")]
    InvalidLineNumberRange,
    #[error("malformed line number operand")]
    MalformedGotoEncoding,
    #[error("program is truncated")]
    TruncatedProgram,
    #[error("empty input")]
    EmptyInput,
    #[error("line has no line number")]
    MissingLineNumber,
    #[error("line is too long")]
    LineTooLong,
    #[error("program does not start with a line separator")]
    MalformedProgram,
    #[error("keyword table is malformed")]
    MalformedTable,
    #[error("byte cannot be stored in a line")]
    UnstorableByte
}

/// Split a line of listing text into its line number and the text that follows.
/// Leading whitespace is skipped, whitespace after the number belongs to the text.
pub fn split_line_number(line: &str) -> Result<(u16,String),Error> {
    let trimmed = line.trim_start();
    let digits = trimmed.len() - trimmed.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits==0 {
        error!("line has no number: {}",line);
        return Err(Error::MissingLineNumber);
    }
    match trimmed[0..digits].parse::<u32>() {
        Ok(num) if num <= MAX_LINE_NUMBER as u32 => Ok((num as u16,trimmed[digits..].to_string())),
        _ => {
            error!("line number {} is out of range",&trimmed[0..digits]);
            Err(Error::InvalidLineNumberRange)
        }
    }
}

/// Escape the byte at `idx` for display in listing text.  Printable ASCII passes through,
/// anything else becomes `\xhh`.  A backslash that would read back as an escape becomes `\x5c`.
pub fn escape_byte(bytes: &[u8],idx: usize) -> String {
    const BACKSLASH: u8 = 92;
    let is_hex = |x: u8| -> bool {
        x.is_ascii_hexdigit()
    };
    let b = bytes[idx];
    if b == BACKSLASH && idx + 3 < bytes.len() && bytes[idx+1]==b'x' && is_hex(bytes[idx+2]) && is_hex(bytes[idx+3]) {
        return "\\x5c".to_string();
    }
    if b==b'\t' {
        return String::from("\t");
    }
    if b < 0x20 || b > 126 {
        let mut temp = String::new();
        write!(&mut temp,"\\x{:02x}",b).expect("unreachable");
        return temp;
    }
    String::from(b as char)
}
