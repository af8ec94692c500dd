// Expected hex strings are the memory image from PAGE to TOP as shown by
// a BBC Micro with BASIC II after typing in the test program.

#[cfg(test)]
use std::fmt::Write;
#[cfg(test)]
use regex::Regex;
#[cfg(test)]
use super::tokenizer::Tokenizer;
#[cfg(test)]
use crate::Dialect;

#[cfg(test)]
fn tokens_to_hex(bytes: &[u8]) -> String {
    let mut listfmt = String::new();
    write!(&mut listfmt,"{:02X?}",bytes).expect("formatting error");
    let re = Regex::new(r"[\[\] ,]").unwrap();
    re.replace_all(&listfmt,"".to_string()).to_string()
}

#[cfg(test)]
fn test_tokenizer(test_code: &str,expected: &str) {
    let tokenizer = Tokenizer::new(Dialect::Bbc);
    let bytes = tokenizer.tokenize(test_code).expect("tokenizer failed");
    assert_eq!(tokens_to_hex(&bytes),expected);
}

#[cfg(test)]
fn test_atom_tokenizer(test_code: &str,expected: &str) {
    let tokenizer = Tokenizer::new(Dialect::Atom);
    let bytes = tokenizer.tokenize(test_code).expect("tokenizer failed");
    assert_eq!(tokens_to_hex(&bytes),expected);
}

mod output_tests {
    #[test]
    fn single_line() {
        let test_code = "10 PRINT \"HELLO\"\n";
        let expected = "0D000A0E20F1202248454C4C4F220DFF";
        super::test_tokenizer(test_code,expected);
    }
    #[test]
    fn multi_line() {
        let test_code = "10 PRINT\n20 END\n";
        let expected = "0D000A0620F10D00140620E00DFF";
        super::test_tokenizer(test_code,expected);
    }
    #[test]
    fn line_endings() {
        let expected = "0D000A0620F10D00140620E00DFF";
        super::test_tokenizer("10 PRINT\r\n20 END\r\n",expected);
        super::test_tokenizer("10 PRINT\r20 END\r",expected);
        super::test_tokenizer("\n\n10 PRINT\n   \n20 END",expected);
    }
    #[test]
    fn keywords_in_strings() {
        let test_code = "10 PRINT \"GOTO 10\"";
        let expected = "0D000A1020F12022474F544F203130220DFF";
        super::test_tokenizer(test_code,expected);
    }
    #[test]
    fn escaped_byte_in_string() {
        let test_code = "10 PRINT \"\\x81\"";
        let expected = "0D000A0A20F1202281220DFF";
        super::test_tokenizer(test_code,expected);
    }
    #[test]
    fn consecutive_escapes() {
        let test_code = "10 PRINT \"\\x81\\x82\"";
        let expected = "0D000A0B20F120228182220DFF";
        super::test_tokenizer(test_code,expected);
    }
    #[test]
    fn tab_is_whitespace() {
        let test_code = "10 PRINT\tX";
        let expected = "0D000A0820F109580DFF";
        super::test_tokenizer(test_code,expected);
    }
    #[test]
    fn lower_case_is_not_keyword() {
        let test_code = "10 print";
        let expected = "0D000A0A207072696E740DFF";
        super::test_tokenizer(test_code,expected);
    }
}

mod abbreviations {
    use super::*;
    #[test]
    fn print_dot() {
        let tokenizer = Tokenizer::new(Dialect::Bbc);
        let full = tokenizer.tokenize("10 PRINT\"HI\"").expect("tokenizer failed");
        let abbrev = tokenizer.tokenize("10 P.\"HI\"").expect("tokenizer failed");
        assert_eq!(tokens_to_hex(&abbrev),"0D000A0A20F1224849220DFF");
        assert_eq!(full,abbrev);
    }
    #[test]
    fn every_abbreviation() {
        let tokenizer = Tokenizer::new(Dialect::Bbc);
        let dict = crate::lang::dictionary::TokenDictionary::new(Dialect::Bbc);
        for entry in dict.entries() {
            let full = tokenizer.tokenize(&format!("10 {}",entry.keyword)).expect("tokenizer failed");
            for abbrev in entry.abbreviations() {
                let short = tokenizer.tokenize(&format!("10 {}",abbrev)).expect("tokenizer failed");
                assert_eq!(short,full,"{} should give the same token as {}",abbrev,entry.keyword);
            }
        }
    }
}

mod conditional_tests {
    #[test]
    fn pi() {
        super::test_tokenizer("10 X=PI","0D000A0820583DAF0DFF");
        super::test_tokenizer("10 X=PI*2","0D000A0A20583DAF2A320DFF");
    }
    #[test]
    fn pi_in_name() {
        super::test_tokenizer("10 X=PIE","0D000A0A20583D5049450DFF");
    }
    #[test]
    fn end_in_name() {
        super::test_tokenizer("10 END","0D000A0620E00DFF");
        super::test_tokenizer("10 ENDIF","0D000A0A20454E4449460DFF");
    }
    #[test]
    fn literal_then_more_statements() {
        super::test_tokenizer("10 X=PIE:PRINT ERRNO","0D000A1220583D5049453AF1204552524E4F0DFF");
        super::test_tokenizer("10 X=PI :PRINT ERR","0D000A0D20583DAF203AF1209F0DFF");
    }
    #[test]
    fn longer_keyword_wins() {
        super::test_tokenizer("10 MODE 7","0D000A0820EB20370DFF");
        super::test_tokenizer("10 X=5 MOD 2","0D000A0C20583D35208320320DFF");
    }
}

mod statement_tests {
    #[test]
    fn pseudo_variable_assignment() {
        super::test_tokenizer("10 TIME=0","0D000A0820D13D300DFF");
        super::test_tokenizer("10 A=1:TIME=0","0D000A0C20413D313AD13D300DFF");
    }
    #[test]
    fn pseudo_variable_in_expression() {
        super::test_tokenizer("10 PRINT TIME","0D000A0820F120910DFF");
        super::test_tokenizer("10 X=TIME","0D000A0820583D910DFF");
    }
    #[test]
    fn variable_names() {
        super::test_tokenizer("10 ATOTAL=1","0D000A0D2041544F54414C3D310DFF");
        super::test_tokenizer("10 TOTAL=1","0D000A0B20B854414C3D310DFF");
    }
    #[test]
    fn proc_names() {
        super::test_tokenizer("10 DEF PROCPRINT","0D000A0D20DD20F25052494E540DFF");
        super::test_tokenizer("10 PROCfoo(1)","0D000A0C20F2666F6F2831290DFF");
    }
    #[test]
    fn hex_literal() {
        super::test_tokenizer("10 X=&DEF","0D000A0B20583D264445460DFF");
    }
    #[test]
    fn os_command() {
        super::test_tokenizer("10 *CAT","0D000A09202A4341540DFF");
    }
    #[test]
    fn rem_and_data() {
        super::test_tokenizer("10 REM PRINT GOTO 10","0D000A1420F4205052494E5420474F544F2031300DFF");
        super::test_tokenizer("10 DATA PRINT,1","0D000A0E20DC205052494E542C310DFF");
    }
}

mod line_number_tests {
    use super::*;
    use crate::lang::Error;
    #[test]
    fn goto() {
        super::test_tokenizer("10 GOTO 100","0D000A0B20E5208D4464400DFF");
    }
    #[test]
    fn gosub_then_statement() {
        super::test_tokenizer("10 GOSUB 100:RETURN","0D000A0D20E4208D4464403AF80DFF");
    }
    #[test]
    fn on_goto_list() {
        super::test_tokenizer("10 ON X GOTO 100,200,300","0D000A1920EE205820E5208D4464402C8D6448402C8D546C410DFF");
    }
    #[test]
    fn then_else() {
        super::test_tokenizer("10 IF X THEN 20 ELSE 30","0D000A1620E72058208C208D545440208B208D545E400DFF");
    }
    #[test]
    fn restore() {
        super::test_tokenizer("10 RESTORE 1000","0D000A0B20F7208D6468430DFF");
    }
    #[test]
    fn operand_out_of_range() {
        let tokenizer = Tokenizer::new(Dialect::Bbc);
        assert_eq!(tokenizer.tokenize_line(10," GOTO 40000"),Err(Error::InvalidLineNumberRange));
        assert_eq!(tokenizer.tokenize_line(10," GOTO 99999999999"),Err(Error::InvalidLineNumberRange));
        assert!(tokenizer.tokenize_line(10," GOTO 32767").is_ok());
    }
    #[test]
    fn line_number_out_of_range() {
        let tokenizer = Tokenizer::new(Dialect::Bbc);
        assert_eq!(tokenizer.tokenize_line(32768," END"),Err(Error::InvalidLineNumberRange));
        assert!(tokenizer.tokenize("40000 END").is_err());
    }
}

mod program_tests {
    use super::*;
    use crate::lang::Error;
    #[test]
    fn line_record() {
        let tokenizer = Tokenizer::new(Dialect::Bbc);
        assert_eq!(tokenizer.tokenize_line(10," PRINT").unwrap(),vec![0x0d,0x00,0x0a,0x06,0x20,0xf1]);
    }
    #[test]
    fn line_too_long() {
        let tokenizer = Tokenizer::new(Dialect::Bbc);
        let text = format!(" PRINT \"{}\"","A".repeat(240));
        assert!(tokenizer.tokenize_line(10,&text).is_ok());
        let text = format!(" PRINT \"{}\"","A".repeat(250));
        assert_eq!(tokenizer.tokenize_line(10,&text),Err(Error::LineTooLong));
    }
    #[test]
    fn empty_program() {
        let tokenizer = Tokenizer::new(Dialect::Bbc);
        assert!(tokenizer.tokenize("").is_err());
        assert!(tokenizer.tokenize("\n  \n").is_err());
    }
    #[test]
    fn missing_line_number() {
        let tokenizer = Tokenizer::new(Dialect::Bbc);
        assert!(tokenizer.tokenize("10 PRINT\nEND\n").is_err());
    }
    #[test]
    fn unstorable_bytes() {
        let tokenizer = Tokenizer::new(Dialect::Bbc);
        assert_eq!(tokenizer.tokenize_line(10," PRINT \"A\\x0dB\""),Err(Error::UnstorableByte));
        assert_eq!(tokenizer.tokenize_line(10," X=\\x8d"),Err(Error::UnstorableByte));
        assert_eq!(tokenizer.tokenize_line(10," *FX \\x8d"),Err(Error::UnstorableByte));
        assert!(tokenizer.tokenize_line(10," PRINT \"\\x8d\"").is_ok());
        assert!(tokenizer.tokenize_line(10," REM \\x8d").is_ok());
        let atom = Tokenizer::new(Dialect::Atom);
        assert_eq!(atom.tokenize_line(10," PRINT \"A\\x0dB\""),Err(Error::UnstorableByte));
        assert!(atom.tokenize_line(10," X=\\x8d").is_ok());
    }
    #[test]
    fn shared_dictionary() {
        let dict = std::sync::Arc::new(crate::lang::dictionary::TokenDictionary::new(Dialect::Bbc));
        let t1 = Tokenizer::with_dictionary(dict.clone());
        let t2 = Tokenizer::with_dictionary(dict);
        assert_eq!(t1.tokenize("10 GOTO 100").unwrap(),t2.tokenize("10 GOTO 100").unwrap());
    }
}

mod atom_tests {
    #[test]
    fn text_is_not_tokenized() {
        let test_code = "10 PRINT \"HI\"\n20 GOTO 10\n";
        let expected = "0D000A205052494E5420224849220D001420474F544F2031300DFF";
        super::test_atom_tokenizer(test_code,expected);
    }
}
