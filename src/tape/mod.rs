//! # Tape Module
//!
//! A file on cassette tape is a sequence of addressed blocks of up to 256 bytes.
//! This module splits a flat byte stream into blocks and joins blocks back into the stream.
//! Container formats (UEF, CSW, TAP) and audio encoders produce and consume `TapeFile`,
//! they are not part of this crate.
//!
//! Block addressing depends on the dialect: Atom blocks are addressed where their data
//! lands in memory, BBC blocks all carry the load address of the file.

pub mod json;

use std::fmt;
use std::str::FromStr;
use log::{debug,warn,error};
use crate::Dialect;

/// Bytes of data in every block except possibly the last
pub const BLOCK_SIZE: usize = 256;
/// Longest name any container can hold
pub const MAX_NAME_LEN: usize = 16;

#[derive(thiserror::Error,Debug,PartialEq)]
pub enum Error {
    #[error("blocks do not form a file")]
    UnmatchedContainer,
    #[error("empty input")]
    EmptyInput,
    #[error("tape file format is wrong")]
    TapeFileFormat
}

/// Position of a block within its file
#[derive(PartialEq,Eq,Clone,Copy,Debug)]
pub enum BlockRole {
    First,
    Last,
    /// the file has a single block
    Only,
    Other
}

impl BlockRole {
    /// Role of the block at `index` in a file of `count` blocks
    pub fn classify(index: usize,count: usize) -> Self {
        match (index,count) {
            (_,1) => Self::Only,
            (0,_) => Self::First,
            (i,n) if i+1==n => Self::Last,
            _ => Self::Other
        }
    }
    pub fn is_first(&self) -> bool {
        *self==Self::First || *self==Self::Only
    }
    pub fn is_last(&self) -> bool {
        *self==Self::Last || *self==Self::Only
    }
}

impl fmt::Display for BlockRole {
    fn fmt(&self,f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f,"first"),
            Self::Last => write!(f,"last"),
            Self::Only => write!(f,"only"),
            Self::Other => write!(f,"other")
        }
    }
}

impl FromStr for BlockRole {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self,Self::Err> {
        match s {
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            "only" => Ok(Self::Only),
            "other" => Ok(Self::Other),
            _ => Err(Error::TapeFileFormat)
        }
    }
}

/// File level information shared by all blocks
#[derive(Clone,Debug,PartialEq)]
pub struct FileHeader {
    pub name: String,
    pub load_addr: u32,
    pub exec_addr: u32,
    /// length of the flat byte stream
    pub size: u32,
    pub dialect: Dialect,
    pub baud_rate: u32,
    pub locked: bool
}

impl FileHeader {
    /// Header with the dialect's default addresses and baud rate, the name is normalized
    pub fn new(name: &str,dialect: Dialect) -> Self {
        Self {
            name: Self::normalize_name(name,dialect),
            load_addr: dialect.default_load_addr(),
            exec_addr: dialect.default_exec_addr(),
            size: 0,
            dialect,
            baud_rate: dialect.baud_rate(),
            locked: false
        }
    }
    /// Keep only printable ASCII other than space, upper case for Atom,
    /// and truncate to the dialect's limit.
    pub fn normalize_name(name: &str,dialect: Dialect) -> String {
        let mut ans: String = name.chars().filter(|c| ('!'..='~').contains(c)).collect();
        if dialect==Dialect::Atom {
            ans = ans.to_uppercase();
        }
        let max = usize::min(dialect.max_name_len(),MAX_NAME_LEN);
        if ans.len() > max {
            warn!("name {} truncated to {} characters",ans,max);
            ans.truncate(max);
        }
        ans
    }
}

#[derive(Clone,Debug,PartialEq)]
pub struct FileBlock {
    pub number: u32,
    pub load_addr: u32,
    pub exec_addr: u32,
    pub data: Vec<u8>,
    pub role: BlockRole,
    pub locked: bool
}

#[derive(Clone,Debug,PartialEq)]
pub struct TapeFile {
    pub header: FileHeader,
    pub blocks: Vec<FileBlock>,
    /// both the first and last blocks are present
    pub complete: bool,
    /// the blocks are inconsistent with each other or with the header
    pub corrupted: bool,
    /// index into `blocks` of the block with the first role
    pub first_block_index: Option<usize>,
    /// index into `blocks` of the block with the last role
    pub last_block_index: Option<usize>
}

impl TapeFile {
    /// Assemble a tape file from blocks obtained elsewhere, e.g. from a container.
    /// Blocks are taken in the order given.
    pub fn from_blocks(header: FileHeader,blocks: Vec<FileBlock>) -> Self {
        let mut ans = Self {
            header,
            blocks,
            complete: false,
            corrupted: false,
            first_block_index: None,
            last_block_index: None
        };
        ans.update_status();
        ans
    }
    /// Locate the first and last blocks and decide whether the file is complete
    pub fn update_status(&mut self) {
        self.first_block_index = self.blocks.iter().position(|b| b.role.is_first());
        self.last_block_index = self.blocks.iter().rposition(|b| b.role.is_last());
        self.complete = match (self.first_block_index,self.last_block_index) {
            (Some(first),Some(last)) => first <= last && self.blocks[first..=last].iter().enumerate()
                .all(|(i,b)| b.number as usize == i + self.blocks[first].number as usize),
            _ => false
        };
    }
    /// Expected load address of the block at `index`
    pub fn block_addr(&self,index: usize) -> u32 {
        match self.header.dialect.increments_block_addr() {
            true => self.header.load_addr.wrapping_add((index * BLOCK_SIZE) as u32),
            false => self.header.load_addr
        }
    }
    /// Check the blocks against each other and the header, returns a description
    /// of each problem found.
    pub fn validate(&self) -> Vec<String> {
        let mut ans = Vec::new();
        let count = self.blocks.len();
        if count==0 {
            ans.push("there are no blocks".to_string());
            return ans;
        }
        let mut total = 0;
        for (i,block) in self.blocks.iter().enumerate() {
            total += block.data.len();
            if block.number as usize != i {
                ans.push(format!("block {} is in position {}",block.number,i));
            }
            if i+1 < count && block.data.len() != BLOCK_SIZE {
                ans.push(format!("block {} has {} bytes",block.number,block.data.len()));
            }
            if block.data.len() > BLOCK_SIZE {
                ans.push(format!("block {} has {} bytes",block.number,block.data.len()));
            }
            let role = BlockRole::classify(i,count);
            if block.role != role {
                ans.push(format!("block {} is marked {} but should be {}",block.number,block.role,role));
            }
            if block.load_addr != self.block_addr(i) {
                ans.push(format!("block {} loads at {:08X} rather than {:08X}",block.number,block.load_addr,self.block_addr(i)));
            }
            if block.exec_addr != self.header.exec_addr {
                ans.push(format!("block {} executes at {:08X} rather than {:08X}",block.number,block.exec_addr,self.header.exec_addr));
            }
            if block.locked != self.header.locked {
                ans.push(format!("block {} lock flag differs from the file",block.number));
            }
        }
        if total != self.header.size as usize {
            ans.push(format!("blocks hold {} bytes but the file size is {}",total,self.header.size));
        }
        ans
    }
}

/// Split a flat byte stream into blocks.  The header's size is set from the stream,
/// and its addresses and lock flag are copied to every block.
/// An empty stream produces a single empty block.
pub fn split(dat: &[u8],header: FileHeader) -> TapeFile {
    let mut header = header;
    header.size = dat.len() as u32;
    let chunks: Vec<&[u8]> = match dat.len() {
        0 => vec![&dat[0..0]],
        _ => dat.chunks(BLOCK_SIZE).collect()
    };
    let count = chunks.len();
    let mut blocks = Vec::new();
    let mut addr = header.load_addr;
    for (i,chunk) in chunks.iter().enumerate() {
        blocks.push(FileBlock {
            number: i as u32,
            load_addr: addr,
            exec_addr: header.exec_addr,
            data: chunk.to_vec(),
            role: BlockRole::classify(i,count),
            locked: header.locked
        });
        if header.dialect.increments_block_addr() {
            addr = addr.wrapping_add(chunk.len() as u32);
        }
    }
    debug!("split {} bytes into {} blocks",dat.len(),count);
    TapeFile {
        header,
        blocks,
        complete: true,
        corrupted: false,
        first_block_index: Some(0),
        last_block_index: Some(count-1)
    }
}

/// Concatenate the data of the blocks in the order they are stored.
/// Inconsistencies are logged and mark the file corrupted, but the data is still returned.
pub fn join(tape: &mut TapeFile) -> Result<Vec<u8>,Error> {
    if tape.blocks.len()==0 {
        error!("tape file has no blocks");
        return Err(Error::UnmatchedContainer);
    }
    let problems = tape.validate();
    for problem in &problems {
        warn!("{}",problem);
    }
    if problems.len() > 0 {
        tape.corrupted = true;
    }
    let mut ans = Vec::new();
    for block in &tape.blocks {
        ans.extend_from_slice(&block.data);
    }
    if ans.len()==0 {
        error!("tape file has no data");
        return Err(Error::UnmatchedContainer);
    }
    Ok(ans)
}
