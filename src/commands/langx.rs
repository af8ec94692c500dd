//! ## Language Transformations

use std::str::FromStr;
use std::io::Write;
use colored::Colorize;
use super::{ItemType,CommandError,read_stdin,read_stdin_string};
use crate::lang::tokenizer::Tokenizer;
use crate::lang::detokenizer::Detokenizer;
use crate::lang::dictionary::{TokenDictionary,TokenFlags};
use crate::{Dialect,STDRESULT};
const RCH: &str = "unreachable was reached";

pub fn tokenize(cmd: &clap::ArgMatches) -> STDRESULT {
    let typ = ItemType::from_str(cmd.get_one::<String>("type").expect(RCH))?;
    if !typ.is_text() {
        return Err(Box::new(CommandError::UnsupportedItemType));
    }
    let program = read_stdin_string("tokenize")?;
    let tokenizer = Tokenizer::new(typ.dialect());
    let object = tokenizer.tokenize(&program)?;
    if atty::is(atty::Stream::Stdout) || cmd.get_flag("console") {
        crate::display_block(0,&object);
    } else {
        std::io::stdout().write_all(&object)?;
    }
    Ok(())
}

pub fn detokenize(cmd: &clap::ArgMatches) -> STDRESULT {
    let typ = ItemType::from_str(cmd.get_one::<String>("type").expect(RCH))?;
    if typ.is_text() {
        return Err(Box::new(CommandError::UnsupportedItemType));
    }
    let tok = read_stdin("detokenize")?;
    let detokenizer = Detokenizer::new(typ.dialect());
    let program = detokenizer.detokenize(&tok)?;
    for line in program.text.lines() {
        println!("{}",line);
    }
    if program.truncated {
        match program.trailing_bytes {
            0 => eprintln!("! {}","program is truncated".bright_yellow()),
            n => eprintln!("! {} {}",n.to_string().bright_yellow(),"bytes follow the program".bright_yellow())
        }
    }
    Ok(())
}

pub fn keywords(cmd: &clap::ArgMatches) -> STDRESULT {
    let dict = TokenDictionary::new(Dialect::Bbc);
    let entries = match cmd.get_one::<String>("flag") {
        Some(name) => match TokenFlags::from_name(name) {
            Some(flags) => dict.flagged(flags),
            None => {
                log::error!("unknown flag {}",name);
                return Err(Box::new(CommandError::InvalidCommand));
            }
        },
        None => dict.entries().collect()
    };
    for entry in &entries {
        println!("{}",entry);
    }
    eprintln!("\u{2713} {} {}",entries.len().to_string().green(),"keywords".green());
    Ok(())
}
