//! ## Tape File Packing

use std::str::FromStr;
use std::io::Write;
use colored::Colorize;
use super::{ItemType,CommandError,parse_addr,read_stdin,read_stdin_string};
use crate::tape::{self,FileHeader,TapeFile};
use crate::STDRESULT;
const RCH: &str = "unreachable was reached";

pub fn pack(cmd: &clap::ArgMatches) -> STDRESULT {
    let typ = ItemType::from_str(cmd.get_one::<String>("type").expect(RCH))?;
    if typ.is_text() {
        log::error!("tokenize the program before packing it");
        return Err(Box::new(CommandError::UnsupportedItemType));
    }
    let name = cmd.get_one::<String>("name").expect(RCH);
    let mut header = FileHeader::new(name,typ.dialect());
    if header.name.len()==0 {
        log::error!("name {} has no usable characters",name);
        return Err(Box::new(CommandError::InvalidCommand));
    }
    if let Some(addr) = cmd.get_one::<String>("addr") {
        header.load_addr = parse_addr(addr)?;
    }
    if let Some(addr) = cmd.get_one::<String>("exec") {
        header.exec_addr = parse_addr(addr)?;
    }
    header.locked = cmd.get_flag("lock");
    let dat = read_stdin("pack")?;
    let tape_file = tape::split(&dat,header);
    println!("{}",tape_file.to_json(cmd.get_one::<u16>("indent").copied()));
    Ok(())
}

pub fn unpack(cmd: &clap::ArgMatches) -> STDRESULT {
    let json_str = read_stdin_string("unpack")?;
    let mut tape_file = TapeFile::from_json(&json_str)?;
    let dat = tape::join(&mut tape_file)?;
    if !tape_file.complete {
        eprintln!("! {}","tape file is incomplete".bright_yellow());
    }
    if tape_file.corrupted {
        eprintln!("! {}","tape file is corrupted".bright_yellow());
    }
    if atty::is(atty::Stream::Stdout) || cmd.get_flag("console") {
        crate::display_block(tape_file.header.load_addr as usize,&dat);
    } else {
        std::io::stdout().write_all(&dat)?;
    }
    Ok(())
}

pub fn blocks(_cmd: &clap::ArgMatches) -> STDRESULT {
    let json_str = read_stdin_string("blocks")?;
    let tape_file = TapeFile::from_json(&json_str)?;
    let header = &tape_file.header;
    println!("{} ({}, {} bytes)",header.name,header.dialect,header.size);
    println!("{:>5} {:>8} {:>8} {:>5} {:6} {}","block","load","exec","size","role","locked");
    for block in &tape_file.blocks {
        println!("{:5} {:08X} {:08X} {:5} {:6} {}",block.number,block.load_addr,block.exec_addr,
            block.data.len(),block.role.to_string(),block.locked);
    }
    let problems = tape_file.validate();
    for problem in &problems {
        eprintln!("! {}",problem.bright_yellow());
    }
    if problems.len()==0 {
        eprintln!("\u{2713} {}","blocks are consistent".green());
    }
    Ok(())
}
