//! # Token dictionary
//!
//! The keyword table for a dialect, looked up either by token id or by text.
//! The text lookup accepts the full keyword or any valid abbreviation, i.e., a proper
//! prefix at least as long as the shortest abbreviation, followed by `.`.
//!
//! A dictionary is built once and never mutated, so one instance can be shared by any
//! number of tokenizers and detokenizers working on different programs.

use std::collections::HashMap;
use std::fmt;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use log::{error,trace};
use crate::Dialect;
use super::{Error,token_maps};
use super::linenum::MARKER;

/// Rules attached to a keyword that control how the text around it is tokenized.
/// The bit values follow the flag byte of the BBC BASIC II ROM table.
#[derive(PartialEq,Eq,Clone,Copy,Debug,Default)]
pub struct TokenFlags(u8);

impl TokenFlags {
    pub const NONE: Self = Self(0);
    /// suppress the token if an alphabetic character immediately follows
    pub const CONDITIONAL: Self = Self(0x01);
    /// after this keyword we are in the middle of a statement
    pub const MIDDLE_OF_STATEMENT: Self = Self(0x02);
    /// after this keyword we are at the start of a statement
    pub const START_OF_STATEMENT: Self = Self(0x04);
    /// the name that follows is copied verbatim
    pub const FN_OR_PROC_NAME: Self = Self(0x08);
    /// numbers that follow are line numbers, packed with `linenum::encode`
    pub const GOTO_LINE_OPERAND: Self = Self(0x10);
    /// the rest of the line is copied verbatim
    pub const STOP_TOKENISE: Self = Self(0x20);
    /// at the start of a statement the id is offset by 0x40
    pub const ASSIGNMENT_VARIANT: Self = Self(0x40);

    pub const fn with(self,other: Self) -> Self {
        Self(self.0 | other.0)
    }
    pub const fn bits(&self) -> u8 {
        self.0
    }
    pub fn contains(&self,other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }
    /// Names of the flags that are set, in bit order
    pub fn names(&self) -> Vec<&'static str> {
        let mut ans = Vec::new();
        for bit in 0..8 {
            if self.0 & (1 << bit) > 0 {
                if let Some(flag) = Flag::from_u8(1 << bit) {
                    ans.push(flag.name());
                }
            }
        }
        ans
    }
    /// Flag with the given name, as produced by `names`
    pub fn from_name(name: &str) -> Option<Self> {
        for bit in 0..8 {
            if let Some(flag) = Flag::from_u8(1 << bit) {
                if flag.name() == name {
                    return Some(Self(1 << bit));
                }
            }
        }
        None
    }
}

#[derive(FromPrimitive,Clone,Copy)]
enum Flag {
    Conditional = 0x01,
    Middle = 0x02,
    Start = 0x04,
    Name = 0x08,
    Line = 0x10,
    Stop = 0x20,
    Assignment = 0x40
}

impl Flag {
    fn name(&self) -> &'static str {
        match self {
            Self::Conditional => "conditional",
            Self::Middle => "middle",
            Self::Start => "start",
            Self::Name => "name",
            Self::Line => "line",
            Self::Stop => "stop",
            Self::Assignment => "assignment"
        }
    }
}

/// One keyword of the dialect
#[derive(Clone,Debug,PartialEq)]
pub struct TokenEntry {
    pub keyword: &'static str,
    /// shortest usable abbreviation without the trailing `.`, None if the keyword cannot be abbreviated
    pub abbreviation: Option<String>,
    pub id: u8,
    pub flags: TokenFlags
}

impl TokenEntry {
    pub fn has(&self,flags: TokenFlags) -> bool {
        self.flags.contains(flags)
    }
    /// id used when the keyword starts a statement, if different
    pub fn assignment_id(&self) -> Option<u8> {
        match self.has(TokenFlags::ASSIGNMENT_VARIANT) {
            true => self.id.checked_add(0x40),
            false => None
        }
    }
    /// Every abbreviated form that resolves to this entry, including the `.`
    pub fn abbreviations(&self) -> Vec<String> {
        match &self.abbreviation {
            Some(abbrev) => (abbrev.len()..self.keyword.len()).map(|n| {
                self.keyword[0..n].to_string() + "."
            }).collect(),
            None => Vec::new()
        }
    }
}

impl fmt::Display for TokenEntry {
    fn fmt(&self,f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abbrev = match &self.abbreviation {
            Some(a) => a.clone() + ".",
            None => "".to_string()
        };
        write!(f,"{:02X} {:10} {:10} {}",self.id,self.keyword,abbrev,self.flags.names().join(","))
    }
}

pub struct TokenDictionary {
    dialect: Dialect,
    entries: Vec<TokenEntry>,
    by_id: HashMap<u8,usize>,
    by_text: HashMap<Vec<u8>,usize>,
    max_len: usize
}

impl TokenDictionary {
    /// Build the dictionary for `dialect`.  The tables are static, failure here is a bug.
    pub fn new(dialect: Dialect) -> Self {
        let table: &[(&'static str,u8,TokenFlags)] = match dialect {
            Dialect::Atom => &[],
            Dialect::Bbc => &token_maps::BBC_KEYWORDS
        };
        Self::from_table(dialect,table).expect("keyword table is malformed")
    }
    /// Build a dictionary from a keyword table.  Abbreviations are derived from table order:
    /// a keyword's shortest abbreviation is its shortest prefix not shared by an earlier keyword.
    pub fn from_table(dialect: Dialect,table: &[(&'static str,u8,TokenFlags)]) -> Result<Self,Error> {
        let mut ans = Self {
            dialect,
            entries: Vec::new(),
            by_id: HashMap::new(),
            by_text: HashMap::new(),
            max_len: 0
        };
        for &(keyword,id,flags) in table {
            if keyword.len()==0 || !keyword.as_bytes()[0].is_ascii_uppercase() {
                error!("keyword `{}` must start with an upper case letter",keyword);
                return Err(Error::MalformedTable);
            }
            if id < 0x80 || id == MARKER {
                error!("keyword {} uses reserved id {:02X}",keyword,id);
                return Err(Error::MalformedTable);
            }
            if ans.by_text.contains_key(keyword.as_bytes()) {
                error!("keyword {} appears twice",keyword);
                return Err(Error::MalformedTable);
            }
            let mut abbreviation = None;
            for n in 1..keyword.len() {
                let prefix = &keyword[0..n];
                if !ans.entries.iter().any(|e| e.keyword.starts_with(prefix)) {
                    abbreviation = Some(prefix.to_string());
                    break;
                }
            }
            let entry = TokenEntry {
                keyword,
                abbreviation,
                id,
                flags
            };
            let idx = ans.entries.len();
            let mut ids = vec![entry.id];
            if entry.has(TokenFlags::ASSIGNMENT_VARIANT) {
                match entry.assignment_id() {
                    Some(alt) => ids.push(alt),
                    None => {
                        error!("assignment id for {} overflows",keyword);
                        return Err(Error::MalformedTable);
                    }
                }
            }
            for id in ids {
                if ans.by_id.insert(id,idx).is_some() {
                    error!("token id {:02X} appears twice",id);
                    return Err(Error::MalformedTable);
                }
            }
            for text in entry.abbreviations() {
                trace!("{} abbreviates {}",text,keyword);
                ans.by_text.insert(text.as_bytes().to_vec(),idx);
            }
            ans.by_text.insert(keyword.as_bytes().to_vec(),idx);
            ans.max_len = usize::max(ans.max_len,keyword.len());
            ans.entries.push(entry);
        }
        Ok(ans)
    }
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    /// Entries in table order
    pub fn entries(&self) -> impl Iterator<Item = &TokenEntry> {
        self.entries.iter()
    }
    /// Look up a token id, including the assignment variant ids
    pub fn lookup_by_id(&self,id: u8) -> Option<&TokenEntry> {
        self.by_id.get(&id).map(|idx| &self.entries[*idx])
    }
    /// Look up a full keyword or an abbreviation ending in `.`
    pub fn lookup_by_text<T: AsRef<[u8]>>(&self,text: T) -> Option<&TokenEntry> {
        self.by_text.get(text.as_ref()).map(|idx| &self.entries[*idx])
    }
    /// Find the longest keyword or abbreviation at the start of `bytes`.
    /// Scanning continues through upper case letters, `$`, `(` and `.`, where `(` and `.`
    /// end the scan.  Returns the entry and the number of bytes it covers.
    pub fn longest_match(&self,bytes: &[u8]) -> Option<(&TokenEntry,usize)> {
        let mut best = None;
        let mut len = 0;
        while len < bytes.len() && len <= self.max_len {
            let c = bytes[len];
            if !c.is_ascii_uppercase() && c!=b'$' && c!=b'(' && c!=b'.' {
                break;
            }
            len += 1;
            if let Some(entry) = self.lookup_by_text(&bytes[0..len]) {
                best = Some((entry,len));
            }
            if c==b'(' || c==b'.' {
                break;
            }
        }
        best
    }
    /// Entries carrying all of `flags`, for inspecting the table
    pub fn flagged(&self,flags: TokenFlags) -> Vec<&TokenEntry> {
        self.entries.iter().filter(|e| e.has(flags)).collect()
    }
}
