//! Module containing the detokenizer
//!
//! The token stream is processed one byte at a time by a small state machine.
//! Soft problems (no end marker, bytes after the end marker, a stream that stops in the
//! middle of a line) are reported in the result rather than as errors, so the caller
//! can keep whatever text was recovered.

use std::sync::Arc;
use log::{error,warn,debug};
use crate::Dialect;
use super::dictionary::{TokenDictionary,TokenFlags};
use super::{linenum,escape_byte,Error,CR,END_MARKER};

/// Result of detokenizing a program
#[derive(Clone,Debug,PartialEq)]
pub struct Detokenized {
    /// listing text, one line per record, each ending in a newline
    pub text: String,
    /// the end marker was missing, or bytes followed it
    pub truncated: bool,
    /// count of bytes that followed the end marker
    pub trailing_bytes: usize
}

enum State {
    /// expecting the `0D` that starts the program
    Start,
    /// gathering the line number, and the length byte for BBC
    LineStart(Vec<u8>),
    Tokenising,
    NoTokenising,
    /// gathering a packed line number, empty until the marker is seen
    AwaitingGotoOperand(Vec<u8>),
    End
}

/// Handles detokenization of Acorn BASIC
pub struct Detokenizer {
    dictionary: Arc<TokenDictionary>
}

impl Detokenizer {
    /// Create a detokenizer with its own dictionary
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dictionary: Arc::new(TokenDictionary::new(dialect))
        }
    }
    /// Create a detokenizer that shares an existing dictionary
    pub fn with_dictionary(dictionary: Arc<TokenDictionary>) -> Self {
        Self {
            dictionary
        }
    }
    pub fn dialect(&self) -> Dialect {
        self.dictionary.dialect()
    }
    fn header_len(&self) -> usize {
        match self.dialect() {
            Dialect::Atom => 2,
            Dialect::Bbc => 3
        }
    }
    /// Handle one byte in the `Tokenising` state
    fn expand(&self,img: &[u8],idx: usize,in_string: &mut bool,text: &mut String) -> State {
        let b = img[idx];
        if *in_string {
            if b==b'"' {
                *in_string = false;
            }
            *text += &escape_byte(img,idx);
            return State::Tokenising;
        }
        if b==linenum::MARKER {
            return State::AwaitingGotoOperand(vec![b]);
        }
        if b==b'"' {
            *in_string = true;
            text.push('"');
            return State::Tokenising;
        }
        if b < 0x80 {
            *text += &escape_byte(img,idx);
            return State::Tokenising;
        }
        match self.dictionary.lookup_by_id(b) {
            Some(entry) => {
                *text += entry.keyword;
                if entry.has(TokenFlags::STOP_TOKENISE) {
                    State::NoTokenising
                } else if entry.has(TokenFlags::GOTO_LINE_OPERAND) {
                    State::AwaitingGotoOperand(Vec::new())
                } else {
                    State::Tokenising
                }
            },
            None => {
                debug!("unassigned token {:02X}",b);
                *text += &escape_byte(img,idx);
                State::Tokenising
            }
        }
    }
    /// Detokenize a program, which must start with `0D`.  Hard errors are an empty
    /// stream, a bad first byte, and a packed line number with a corrupt payload.
    pub fn detokenize(&self,img: &[u8]) -> Result<Detokenized,Error> {
        if img.len()==0 {
            error!("token stream is empty");
            return Err(Error::EmptyInput);
        }
        let header_len = self.header_len();
        let mut ans = Detokenized {
            text: String::new(),
            truncated: false,
            trailing_bytes: 0
        };
        let mut state = State::Start;
        let mut in_string = false;
        // index of the `0D` that opened the current line, and its length byte
        let mut record: (usize,Option<u8>) = (0,None);
        for idx in 0..img.len() {
            let b = img[idx];
            state = match state {
                State::Start => {
                    if b!=CR {
                        error!("program starts with {:02X} rather than {:02X}",b,CR);
                        return Err(Error::MalformedProgram);
                    }
                    State::LineStart(Vec::new())
                },
                State::LineStart(mut header) => {
                    if header.len()==0 && b==END_MARKER {
                        ans.trailing_bytes = img.len() - idx - 1;
                        State::End
                    } else {
                        header.push(b);
                        if header.len() < header_len {
                            State::LineStart(header)
                        } else {
                            let num = u16::from_be_bytes([header[0],header[1]]);
                            ans.text += &num.to_string();
                            record = (idx - header_len,header.get(2).copied());
                            in_string = false;
                            match self.dialect() {
                                Dialect::Atom => State::NoTokenising,
                                Dialect::Bbc => State::Tokenising
                            }
                        }
                    }
                },
                State::AwaitingGotoOperand(operand) if b==CR => {
                    if operand.len() > 0 {
                        warn!("line number operand cut off by end of line");
                    }
                    self.end_line(idx,record,&mut ans.text)
                },
                State::Tokenising | State::NoTokenising if b==CR => {
                    self.end_line(idx,record,&mut ans.text)
                },
                State::NoTokenising => {
                    ans.text += &escape_byte(img,idx);
                    State::NoTokenising
                },
                State::Tokenising => self.expand(img,idx,&mut in_string,&mut ans.text),
                State::AwaitingGotoOperand(mut operand) => {
                    if operand.len()==0 && b==linenum::MARKER {
                        operand.push(b);
                        State::AwaitingGotoOperand(operand)
                    } else if operand.len()==0 && (b==b' ' || b==b'\t' || b==b',') {
                        ans.text.push(b as char);
                        State::AwaitingGotoOperand(operand)
                    } else if operand.len()==0 {
                        // not a line number after all
                        self.expand(img,idx,&mut in_string,&mut ans.text)
                    } else {
                        operand.push(b);
                        if operand.len() < linenum::PACKED_LEN {
                            State::AwaitingGotoOperand(operand)
                        } else {
                            ans.text += &linenum::decode(&operand)?.to_string();
                            State::Tokenising
                        }
                    }
                },
                State::End => State::End
            };
            if let State::End = state {
                break;
            }
        }
        match state {
            State::End => {
                if ans.trailing_bytes > 0 {
                    warn!("{} bytes follow the end of the program",ans.trailing_bytes);
                    ans.truncated = true;
                }
            },
            State::LineStart(header) if header.len() > 0 => {
                warn!("program ends inside a line header");
                ans.truncated = true;
            },
            State::AwaitingGotoOperand(operand) if operand.len() > 0 => {
                warn!("program ends inside a line number operand");
                ans.truncated = true;
            },
            _ => {
                warn!("program has no end marker");
                ans.truncated = true;
            }
        }
        Ok(ans)
    }
    /// Finish a line at the `0D` found at `idx`
    fn end_line(&self,idx: usize,record: (usize,Option<u8>),text: &mut String) -> State {
        if let (start,Some(expected)) = record {
            if idx - start != expected as usize {
                warn!("line length byte is {} but the line is {} bytes",expected,idx - start);
            }
        }
        text.push('\n');
        State::LineStart(Vec::new())
    }
}
