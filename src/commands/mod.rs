//! # CLI Subcommands
//!
//! Contains modules that run the subcommands.

pub mod langx;
pub mod tape;

use std::str::FromStr;
use std::io::Read;
use crate::{Dialect,DYNERR};

#[derive(thiserror::Error,Debug)]
pub enum CommandError {
    #[error("Item type is not yet supported")]
    UnsupportedItemType,
    #[error("Item type is unknown")]
    UnknownItemType,
    #[error("Dialect is unknown")]
    UnknownDialect,
    #[error("Command could not be interpreted")]
    InvalidCommand,
    #[error("One of the parameters was out of range")]
    OutOfRange
}

/// Types of data handled by the subcommands.  The first letter is the dialect,
/// `a` for Atom and `b` for BBC.
#[derive(PartialEq,Clone,Copy,Debug)]
pub enum ItemType {
    AtomText,
    BbcText,
    AtomTokens,
    BbcTokens
}

impl ItemType {
    pub fn dialect(&self) -> Dialect {
        match self {
            Self::AtomText | Self::AtomTokens => Dialect::Atom,
            Self::BbcText | Self::BbcTokens => Dialect::Bbc
        }
    }
    pub fn is_text(&self) -> bool {
        *self==Self::AtomText || *self==Self::BbcText
    }
}

impl FromStr for ItemType {
    type Err = CommandError;
    fn from_str(s: &str) -> Result<Self,Self::Err> {
        match s {
            "atxt" => Ok(Self::AtomText),
            "btxt" => Ok(Self::BbcText),
            "atok" => Ok(Self::AtomTokens),
            "btok" => Ok(Self::BbcTokens),
            _ => Err(CommandError::UnknownItemType)
        }
    }
}

/// Parse an address given as hex, with an optional `0x`, `$` or `&` prefix
pub fn parse_addr(s: &str) -> Result<u32,CommandError> {
    let digits = s.trim_start_matches("0x").trim_start_matches(['$','&']);
    match u32::from_str_radix(digits,16) {
        Ok(addr) => Ok(addr),
        Err(_) => {
            log::error!("address {} is not valid hex",s);
            Err(CommandError::OutOfRange)
        }
    }
}

/// Read all of stdin, refusing to take line entry from the console
fn read_stdin(subcommand: &str) -> Result<Vec<u8>,DYNERR> {
    if atty::is(atty::Stream::Stdin) {
        log::error!("line entry is not supported for `{}`, please pipe something in",subcommand);
        return Err(Box::new(CommandError::InvalidCommand));
    }
    let mut dat: Vec<u8> = Vec::new();
    std::io::stdin().read_to_end(&mut dat)?;
    if dat.len()==0 {
        log::error!("{} did not receive any data from previous node",subcommand);
        return Err(Box::new(CommandError::InvalidCommand));
    }
    Ok(dat)
}

/// Read all of stdin as a string
fn read_stdin_string(subcommand: &str) -> Result<String,DYNERR> {
    let dat = read_stdin(subcommand)?;
    match String::from_utf8(dat) {
        Ok(s) => Ok(s),
        Err(e) => {
            log::error!("the input to {} could not be interpreted as a string",subcommand);
            Err(Box::new(e))
        }
    }
}

#[test]
fn test_item_types() {
    assert_eq!(ItemType::from_str("btok").unwrap().dialect(),Dialect::Bbc);
    assert!(ItemType::from_str("atxt").unwrap().is_text());
    assert!(ItemType::from_str("itok").is_err());
    assert_eq!(parse_addr("0x1900").unwrap(),0x1900);
    assert_eq!(parse_addr("&FFFF0E00").unwrap(),0xffff0e00);
    assert_eq!(parse_addr("$2900").unwrap(),0x2900);
    assert!(parse_addr("xyz").is_err());
}
