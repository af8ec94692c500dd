//! Module containing the tokenizer
//!
//! Listing text is scanned left to right a lexeme at a time.  Two decisions cannot be made
//! when a keyword is matched: whether a conditional keyword is really a keyword (it is not
//! if a letter follows immediately), and whether the next number is a line number operand.
//! Both are carried to the next lexeme as a `Pending` value.

use std::ops::Range;
use std::sync::Arc;
use log::{error,warn,trace};
use crate::Dialect;
use crate::DYNERR;
use super::dictionary::{TokenDictionary,TokenFlags};
use super::{linenum,Error,CR,END_MARKER,MAX_LINE_NUMBER};

/// Longest line body the BBC length byte can describe
pub const MAX_BODY_LEN: usize = 251;

/// Decision deferred from one lexeme to the next
#[derive(Clone,Debug,PartialEq)]
enum Pending {
    None,
    /// a conditional keyword, `text` locates its source bytes in case it stays literal
    Conditional { id: u8, flags: TokenFlags, text: Range<usize> },
    /// numbers that follow are packed line numbers
    GotoOperand
}

/// Scanning state for one line
struct LineScanner<'a> {
    dictionary: &'a TokenDictionary,
    bytes: &'a [u8],
    pos: usize,
    out: Vec<u8>,
    start_of_statement: bool,
    in_string: bool,
    stop: bool,
    /// set when a keyword such as `REM` made the rest of the line verbatim
    stop_keyword: bool,
    name_follows: bool
}

impl <'a> LineScanner<'a> {
    fn new(dictionary: &'a TokenDictionary,bytes: &'a [u8]) -> Self {
        Self {
            dictionary,
            bytes,
            pos: 0,
            out: Vec::new(),
            start_of_statement: true,
            in_string: false,
            stop: false,
            stop_keyword: false,
            name_follows: false
        }
    }
    fn run(mut self) -> Result<Vec<u8>,Error> {
        let mut pending = Pending::None;
        while self.pos < self.bytes.len() {
            // a deferred keyword goes out ahead of the whitespace, or absorbs the name that follows
            pending = self.resolve(pending,is_space(self.bytes[self.pos]));
            let mut ws_end = self.pos;
            while ws_end < self.bytes.len() && is_space(self.bytes[ws_end]) {
                ws_end += 1;
            }
            self.out.extend_from_slice(&self.bytes[self.pos..ws_end]);
            self.pos = ws_end;
            if self.pos >= self.bytes.len() {
                break;
            }
            pending = self.lexeme(pending)?;
        }
        self.resolve(pending,true);
        Ok(self.out)
    }
    /// Settle a pending conditional keyword given what follows it.
    /// If a letter follows immediately the keyword text and the rest of the name are copied.
    fn resolve(&mut self,pending: Pending,spaced: bool) -> Pending {
        match pending {
            Pending::Conditional { id, flags, text } => {
                let next = self.bytes.get(self.pos).copied();
                match next {
                    Some(c) if !spaced && c.is_ascii_alphabetic() => {
                        trace!("{} stays literal",String::from_utf8_lossy(&self.bytes[text.clone()]));
                        self.out.extend_from_slice(&self.bytes[text]);
                        self.copy_name();
                        self.start_of_statement = false;
                        Pending::None
                    },
                    _ => self.emit_keyword(id,flags)
                }
            },
            other => other
        }
    }
    fn emit_keyword(&mut self,id: u8,flags: TokenFlags) -> Pending {
        self.out.push(id);
        if flags.contains(TokenFlags::STOP_TOKENISE) {
            self.stop = true;
            self.stop_keyword = true;
        }
        if flags.contains(TokenFlags::FN_OR_PROC_NAME) {
            self.name_follows = true;
        }
        if flags.contains(TokenFlags::MIDDLE_OF_STATEMENT) {
            self.start_of_statement = false;
        }
        if flags.contains(TokenFlags::START_OF_STATEMENT) {
            self.start_of_statement = true;
        }
        match flags.contains(TokenFlags::GOTO_LINE_OPERAND) {
            true => Pending::GotoOperand,
            false => Pending::None
        }
    }
    /// copy a run of bytes satisfying `pred` starting at the cursor
    fn copy_while<F: Fn(u8) -> bool>(&mut self,pred: F) -> usize {
        let beg = self.pos;
        while self.pos < self.bytes.len() && pred(self.bytes[self.pos]) {
            self.pos += 1;
        }
        self.out.extend_from_slice(&self.bytes[beg..self.pos]);
        self.pos - beg
    }
    fn copy_name(&mut self) -> usize {
        self.copy_while(|c| c.is_ascii_alphanumeric() || c==b'_')
    }
    fn copy_byte(&mut self) {
        self.out.push(self.bytes[self.pos]);
        self.pos += 1;
    }
    /// Process the lexeme at the cursor, which is not whitespace
    fn lexeme(&mut self,pending: Pending) -> Result<Pending,Error> {
        let b = self.bytes[self.pos];
        if self.stop {
            if !self.stop_keyword && self.bytes[self.pos..].contains(&linenum::MARKER) {
                error!("line number marker {:02X} in an OS command",linenum::MARKER);
                return Err(Error::UnstorableByte);
            }
            self.copy_while(|_| true);
            return Ok(Pending::None);
        }
        if self.in_string {
            if b==b'"' {
                self.in_string = false;
            }
            self.copy_byte();
            return Ok(pending);
        }
        if pending==Pending::GotoOperand {
            if b.is_ascii_digit() {
                let beg = self.pos;
                let mut end = beg;
                while end < self.bytes.len() && self.bytes[end].is_ascii_digit() {
                    end += 1;
                }
                let num = match parse_number(&self.bytes[beg..end]) {
                    Some(n) if n <= MAX_LINE_NUMBER as u32 => n as u16,
                    _ => {
                        error!("line number {} is out of range",String::from_utf8_lossy(&self.bytes[beg..end]));
                        return Err(Error::InvalidLineNumberRange);
                    }
                };
                self.out.extend_from_slice(&linenum::encode(num)?);
                self.pos = end;
                self.start_of_statement = false;
                return Ok(Pending::GotoOperand);
            }
            if b==b',' {
                self.copy_byte();
                return Ok(Pending::GotoOperand);
            }
        }
        if self.name_follows {
            self.name_follows = false;
            if self.copy_name() > 0 {
                self.start_of_statement = false;
                return Ok(Pending::None);
            }
        }
        match b {
            b'"' => {
                self.in_string = true;
                self.copy_byte();
            },
            b':' => {
                self.start_of_statement = true;
                self.copy_byte();
            },
            b'*' if self.start_of_statement => {
                trace!("OS command, rest of line is verbatim");
                self.stop = true;
                self.copy_byte();
            },
            b'&' => {
                self.copy_byte();
                self.copy_while(|c| c.is_ascii_digit() || (b'A'..=b'F').contains(&c));
                self.start_of_statement = false;
            },
            b'0'..=b'9' => {
                self.copy_while(|c| c.is_ascii_digit());
                self.start_of_statement = false;
            },
            b'A'..=b'Z' => {
                let found = self.dictionary.longest_match(&self.bytes[self.pos..])
                    .map(|(entry,len)| (entry.id,entry.assignment_id(),entry.flags,len));
                match found {
                    Some((primary,alt,flags,len)) => {
                        let id = match (self.start_of_statement,alt) {
                            (true,Some(alt)) => alt,
                            _ => primary
                        };
                        let text = self.pos..self.pos+len;
                        self.pos += len;
                        if flags.contains(TokenFlags::CONDITIONAL) {
                            return Ok(Pending::Conditional { id, flags, text });
                        }
                        return Ok(self.emit_keyword(id,flags));
                    },
                    None => {
                        self.copy_name();
                        self.start_of_statement = false;
                    }
                }
            },
            b'a'..=b'z' | b'_' => {
                self.copy_name();
                self.start_of_statement = false;
            },
            linenum::MARKER => {
                error!("line number marker {:02X} outside a string",b);
                return Err(Error::UnstorableByte);
            },
            _ => self.copy_byte()
        }
        Ok(Pending::None)
    }
}

fn is_space(c: u8) -> bool {
    c==b' ' || c==b'\t'
}

/// Parse a run of decimal digits, None if it does not fit
fn parse_number(digits: &[u8]) -> Option<u32> {
    std::str::from_utf8(digits).ok()?.parse::<u32>().ok()
}

/// Handles tokenization of Acorn BASIC
pub struct Tokenizer {
    dictionary: Arc<TokenDictionary>
}

impl Tokenizer {
    /// Create a tokenizer with its own dictionary
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dictionary: Arc::new(TokenDictionary::new(dialect))
        }
    }
    /// Create a tokenizer that shares an existing dictionary
    pub fn with_dictionary(dictionary: Arc<TokenDictionary>) -> Self {
        Self {
            dictionary
        }
    }
    pub fn dialect(&self) -> Dialect {
        self.dictionary.dialect()
    }
    /// Tokenize one line of text that follows the line number.  The result is a complete
    /// line record, `0D hi lo len body` for BBC or `0D hi lo body` for Atom.
    pub fn tokenize_line(&self,num: u16,text: &str) -> Result<Vec<u8>,Error> {
        if num > MAX_LINE_NUMBER {
            error!("line number {} is out of range",num);
            return Err(Error::InvalidLineNumberRange);
        }
        let bytes = crate::parse_escaped_ascii(text,false);
        if bytes.contains(&CR) {
            error!("line {} contains a line separator",num);
            return Err(Error::UnstorableByte);
        }
        let mut ans = vec![CR];
        ans.extend_from_slice(&u16::to_be_bytes(num));
        match self.dialect() {
            Dialect::Atom => {
                ans.extend_from_slice(&bytes);
            },
            Dialect::Bbc => {
                let mut body = LineScanner::new(&self.dictionary,&bytes).run()?;
                if body.len() > MAX_BODY_LEN {
                    error!("line {} is {} bytes after tokenizing",num,body.len());
                    return Err(Error::LineTooLong);
                }
                ans.push(body.len() as u8 + 4);
                ans.append(&mut body);
            }
        }
        Ok(ans)
    }
    /// Tokenize a program contained in a UTF8 string, result is an array of bytes
    /// that starts with `0D` and ends with `0D FF`.
    pub fn tokenize(&self,program: &str) -> Result<Vec<u8>,DYNERR> {
        let mut tokenized_program: Vec<u8> = Vec::new();
        let mut prev: Option<u16> = None;
        for line in program.split(|c| c=='\n' || c=='\r') {
            if line.trim().len()==0 {
                continue;
            }
            let (num,text) = super::split_line_number(line)?;
            if let Some(prev_num) = prev {
                if num <= prev_num {
                    warn!("line {} follows line {}",num,prev_num);
                }
            }
            prev = Some(num);
            let mut record = self.tokenize_line(num,&text)?;
            tokenized_program.append(&mut record);
        }
        if prev.is_none() {
            error!("no program lines were found");
            return Err(Box::new(Error::EmptyInput));
        }
        tokenized_program.push(CR);
        tokenized_program.push(END_MARKER);
        Ok(tokenized_program)
    }
}
