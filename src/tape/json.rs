//! JSON representation of a tape file.
//! Addresses are hex strings, block data is a hex string, blocks are keyed by block number.

use std::str::FromStr;
use std::collections::BTreeMap;
use super::{TapeFile,FileHeader,FileBlock,BlockRole,Error};
use crate::{Dialect,DYNERR};

impl TapeFile {
    pub fn tape_version() -> String {
        "1.0.0".to_string()
    }
    /// the string slices must be in the form X.Y.Z or else we return an error
    fn version_tuple(vers: &str) -> Result<(usize,usize,usize),DYNERR> {
        let v: Vec<usize> = vers.split(".").filter_map(|s| usize::from_str(s).ok()).collect();
        if v.len()!=3 {
            log::error!("bad version format {}",vers);
            return Err(Box::new(Error::TapeFileFormat));
        }
        Ok((v[0],v[1],v[2]))
    }
    fn parse_str(key: &str,parsed: &json::JsonValue) -> Result<String,DYNERR> {
        if let Some(s) = parsed[key].as_str() {
            return Ok(s.to_string());
        }
        log::error!("record `{}` is missing in the tape file",key);
        Err(Box::new(Error::TapeFileFormat))
    }
    fn parse_addr(key: &str,parsed: &json::JsonValue) -> Result<u32,DYNERR> {
        if let Some(s) = parsed[key].as_str() {
            if let Ok(val) = u32::from_str_radix(s,16) {
                return Ok(val);
            }
        }
        log::error!("record `{}` is missing or not hex",key);
        Err(Box::new(Error::TapeFileFormat))
    }
    fn parse_u32(key: &str,parsed: &json::JsonValue) -> Result<u32,DYNERR> {
        if let Some(val) = parsed[key].as_u32() {
            return Ok(val);
        }
        log::error!("record `{}` is missing in the tape file",key);
        Err(Box::new(Error::TapeFileFormat))
    }
    fn parse_bool(key: &str,parsed: &json::JsonValue) -> Result<bool,DYNERR> {
        if let Some(val) = parsed[key].as_bool() {
            return Ok(val);
        }
        log::error!("record `{}` is missing in the tape file",key);
        Err(Box::new(Error::TapeFileFormat))
    }
    fn parse_hex_to_vec(key: &str,parsed: &json::JsonValue) -> Result<Vec<u8>,DYNERR> {
        if let Some(s) = parsed[key].as_str() {
            if let Ok(bytes) = hex::decode(s) {
                return Ok(bytes);
            }
        }
        log::error!("record `{}` is missing or not hex",key);
        Err(Box::new(Error::TapeFileFormat))
    }
    /// Get a tape file from its JSON string representation.  The completeness of the file
    /// is worked out from the block roles.
    pub fn from_json(json_str: &str) -> Result<TapeFile,DYNERR> {
        let parsed = json::parse(json_str)?;
        let tape_version = Self::parse_str("tape_version",&parsed)?;
        if Self::version_tuple(&tape_version)?.0 != 1 {
            log::error!("tape file version {} is not supported",tape_version);
            return Err(Box::new(Error::TapeFileFormat));
        }
        let dialect = match Dialect::from_str(&Self::parse_str("dialect",&parsed)?) {
            Ok(d) => d,
            Err(_) => {
                log::error!("unknown dialect in tape file");
                return Err(Box::new(Error::TapeFileFormat));
            }
        };
        let header = FileHeader {
            name: Self::parse_str("name",&parsed)?,
            load_addr: Self::parse_addr("load_addr",&parsed)?,
            exec_addr: Self::parse_addr("exec_addr",&parsed)?,
            size: Self::parse_u32("size",&parsed)?,
            dialect,
            baud_rate: Self::parse_u32("baud_rate",&parsed)?,
            locked: Self::parse_bool("locked",&parsed)?
        };
        let mut sorted: BTreeMap<u32,FileBlock> = BTreeMap::new();
        let map_obj = &parsed["blocks"];
        if map_obj.entries().len()==0 {
            log::warn!("tape file contains a header, but no blocks");
        }
        for (key,obj) in map_obj.entries() {
            let number = match u32::from_str(key) {
                Ok(n) => n,
                Err(_) => {
                    log::error!("block key {} is not a number",key);
                    return Err(Box::new(Error::TapeFileFormat));
                }
            };
            let role = BlockRole::from_str(&Self::parse_str("role",obj)?)?;
            sorted.insert(number,FileBlock {
                number,
                load_addr: Self::parse_addr("load_addr",obj)?,
                exec_addr: Self::parse_addr("exec_addr",obj)?,
                data: Self::parse_hex_to_vec("data",obj)?,
                role,
                locked: Self::parse_bool("locked",obj)?
            });
        }
        Ok(Self::from_blocks(header,sorted.into_values().collect()))
    }
    /// Put the tape file into its JSON string representation
    pub fn to_json(&self,indent: Option<u16>) -> String {
        let mut json_map = json::JsonValue::new_object();
        for block in &self.blocks {
            json_map[block.number.to_string()] = json::object! {
                load_addr: format!("{:08X}",block.load_addr),
                exec_addr: format!("{:08X}",block.exec_addr),
                role: block.role.to_string(),
                locked: block.locked,
                data: hex::encode_upper(&block.data)
            };
        }
        let ans = json::object! {
            tape_version: Self::tape_version(),
            dialect: self.header.dialect.to_string(),
            name: self.header.name.clone(),
            load_addr: format!("{:08X}",self.header.load_addr),
            exec_addr: format!("{:08X}",self.header.exec_addr),
            size: self.header.size,
            baud_rate: self.header.baud_rate,
            locked: self.header.locked,
            blocks: json_map
        };
        if let Some(spaces) = indent {
            return json::stringify_pretty(ans, spaces);
        } else {
            return json::stringify(ans);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tape::split;

    #[test]
    fn round_trip() {
        let dat: Vec<u8> = (0..600).map(|i| (i % 251) as u8).collect();
        let mut header = FileHeader::new("Game",Dialect::Bbc);
        header.locked = true;
        let tape = split(&dat,header);
        let s = tape.to_json(Some(2));
        assert!(s.contains("\"load_addr\": \"FFFF0E00\""));
        let restored = TapeFile::from_json(&s).unwrap();
        assert_eq!(restored,tape);
        assert!(restored.complete);
    }
    #[test]
    fn compact() {
        let tape = split(b"HI",FileHeader::new("x",Dialect::Atom));
        let s = tape.to_json(None);
        assert!(s.contains("\"name\":\"X\""));
        assert!(s.contains("\"data\":\"4849\""));
        assert!(s.contains("\"role\":\"only\""));
    }
    #[test]
    fn bad_records() {
        assert!(TapeFile::from_json("{}").is_err());
        assert!(TapeFile::from_json("not json").is_err());
        let tape = split(b"HI",FileHeader::new("X",Dialect::Atom));
        let s = tape.to_json(None).replace("\"1.0.0\"","\"2.0.0\"");
        assert!(TapeFile::from_json(&s).is_err());
        let s = tape.to_json(None).replace("\"only\"","\"middle\"");
        assert!(TapeFile::from_json(&s).is_err());
        let s = tape.to_json(None).replace("4849","48Z9");
        assert!(TapeFile::from_json(&s).is_err());
    }
    #[test]
    fn blocks_are_sorted() {
        let dat = vec![0xaa;300];
        let tape = split(&dat,FileHeader::new("X",Dialect::Bbc));
        let s = tape.to_json(None);
        let first = s.find("\"0\":").unwrap();
        let second = s.find("\"1\":").unwrap();
        assert!(first < second);
        let restored = TapeFile::from_json(&s).unwrap();
        assert_eq!(restored.blocks[1].number,1);
    }
}
