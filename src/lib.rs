//! # `acornkit` main library
//!
//! This library converts Acorn BASIC programs between listing text and the tokenized
//! form the machine keeps in memory, and packages that form into the addressed blocks
//! used by cassette tape files.
//!
//! ## Architecture
//!
//! There are two layers, each a set of pure transformations:
//! * `lang` converts between text and the in-memory token stream
//! * `tape` slices a flat byte stream into tape blocks and joins them back together
//!
//! Both layers are parameterized by a `Dialect`.  The Atom stores its program text without
//! keyword tokens, so only line numbers are packed.  The BBC Micro tokenizes keywords and
//! packs the line numbers that follow GOTO-class keywords.
//!
//! ## Language Files
//!
//! * `lang::tokenizer` turns listing text into tokens
//! * `lang::detokenizer` turns tokens back into listing text
//! * `lang::dictionary` holds the keyword table, built once per dialect
//! * `lang::linenum` packs and unpacks line number operands
//!
//! ## Tape Files
//!
//! A `tape::TapeFile` is the value exchanged with container formats (UEF, CSW, TAP, disc
//! images) and audio encoders, all of which live outside this crate.

pub mod lang;
pub mod tape;
pub mod commands;
pub mod cli;

use std::fmt;
use std::str::FromStr;
use regex::Regex;
use hex;

type DYNERR = Box<dyn std::error::Error>;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

/// The target machine, which fixes both the BASIC encoding and the tape container policy.
#[derive(PartialEq,Eq,Clone,Copy,Debug)]
pub enum Dialect {
    /// Acorn Atom, program text is stored without keyword tokens
    Atom,
    /// BBC Micro running BBC BASIC II, keywords are tokenized
    Bbc
}

impl FromStr for Dialect {
    type Err = commands::CommandError;
    fn from_str(s: &str) -> Result<Self,Self::Err> {
        match s.to_lowercase().as_str() {
            "atom" => Ok(Self::Atom),
            "bbc" => Ok(Self::Bbc),
            _ => Err(commands::CommandError::UnknownDialect)
        }
    }
}

impl Dialect {
    /// Where a program is loaded when no address is given
    pub fn default_load_addr(&self) -> u32 {
        match self {
            Self::Atom => 0x2900,
            Self::Bbc => 0xffff0e00
        }
    }
    /// Where a program is entered when no address is given
    pub fn default_exec_addr(&self) -> u32 {
        match self {
            Self::Atom => 0xc2b2,
            Self::Bbc => 0xffff8023
        }
    }
    pub fn max_name_len(&self) -> usize {
        match self {
            Self::Atom => 13,
            Self::Bbc => 10
        }
    }
    /// Baud rate the machine records at by default
    pub fn baud_rate(&self) -> u32 {
        match self {
            Self::Atom => 300,
            Self::Bbc => 1200
        }
    }
    /// If true each tape block is addressed where its data lands, otherwise
    /// every block carries the load address of the file.
    pub fn increments_block_addr(&self) -> bool {
        *self == Self::Atom
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self,f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom => write!(f,"atom"),
            Self::Bbc => write!(f,"bbc")
        }
    }
}

/// Display binary to stdout in columns of hex and ascii
pub fn display_block(start_addr: usize,block: &[u8]) {
    let mut slice_start = 0;
    loop {
        let row_label = start_addr + slice_start;
        let mut slice_end = slice_start + 16;
        if slice_end > block.len() {
            slice_end = block.len();
        }
        let slice = block[slice_start..slice_end].to_vec();
        let txt: Vec<u8> = slice.iter().map(|c| match *c {
            x if x<32 => '.' as u8,
            x if x<127 => x,
            _ => '.' as u8
        }).collect();
        print!("{:04X} : ",row_label);
        for byte in slice {
            print!("{:02X} ",byte);
        }
        for _blank in slice_end..slice_start+16 {
            print!("   ");
        }
        println!("| {}",String::from_utf8_lossy(&txt));
        slice_start += 16;
        if slice_end==block.len() {
            break;
        }
    }
}

/// Interpret a UTF8 string as pure ascii and put into bytes.
/// Non-ascii characters are omitted from the result, but arbitrary
/// bytes can be introduced using escapes, e.g., `\xFF`.
/// Literal hex escapes are created by coding the backslash, e.g., `\x5CxFF`.
/// if `caps` is true the ascii is put in upper case.
pub fn parse_escaped_ascii(s: &str,caps: bool) -> Vec<u8> {
    let mut ans: Vec<u8> = Vec::new();
    let hex_patt = Regex::new(r"\\x[0-9A-Fa-f][0-9A-Fa-f]").expect("unreachable");
    let mut hexes = hex_patt.find_iter(s);
    let mut maybe_hex = hexes.next();
    let mut skip_to = 0;
    for (curs,c) in s.char_indices() {
        if curs < skip_to {
            continue;
        }
        if let Some(esc) = maybe_hex {
            if curs==esc.start() {
                if let Ok(mut bytes) = hex::decode(&s[curs+2..esc.end()]) {
                    ans.append(&mut bytes);
                }
                skip_to = esc.end();
                maybe_hex = hexes.next();
                continue;
            }
        }
        if c.is_ascii() {
            let mut buf: [u8;1] = [0;1];
            match caps {
                true => c.to_ascii_uppercase().encode_utf8(&mut buf),
                false => c.encode_utf8(&mut buf)
            };
            ans.push(buf[0]);
        }
    }
    return ans;
}

#[test]
fn test_escapes() {
    assert_eq!(parse_escaped_ascii("A\\x0dB",false),vec![0x41,0x0d,0x42]);
    assert_eq!(parse_escaped_ascii("\\x81\\x82",false),vec![0x81,0x82]);
    assert_eq!(parse_escaped_ascii("A\\x81\\x82b",true),vec![0x41,0x81,0x82,0x42]);
    assert_eq!(parse_escaped_ascii("\\x5Cx41",false),b"\\x41".to_vec());
    assert_eq!(parse_escaped_ascii("print",true),b"PRINT".to_vec());
    assert_eq!(parse_escaped_ascii("caf\u{e9}",false),b"caf".to_vec());
}

#[test]
fn test_dialect_names() {
    assert_eq!(Dialect::from_str("BBC").unwrap(),Dialect::Bbc);
    assert_eq!(Dialect::from_str("atom").unwrap(),Dialect::Atom);
    assert!(Dialect::from_str("electron").is_err());
    assert_eq!(Dialect::Atom.to_string(),"atom");
}
