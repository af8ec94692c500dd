use assert_cmd::Command; // Run programs
use predicates::prelude::*; // Used for writing assertions
use std::path::Path;

const GOTO_100: [u8;13] = [0x0d,0x00,0x0a,0x0b,0x20,0xe5,0x20,0x8d,0x44,0x64,0x40,0x0d,0xff];

#[test]
fn tokenize_goto() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("acornkit")?;
    cmd.arg("tokenize")
        .arg("-t").arg("btxt")
        .write_stdin("10 GOTO 100\n")
        .assert()
        .success()
        .stdout(GOTO_100.to_vec());
    Ok(())
}

#[test]
fn detokenize_goto() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("acornkit")?;
    cmd.arg("detokenize")
        .arg("-t").arg("btok")
        .write_stdin(GOTO_100.to_vec())
        .assert()
        .success()
        .stdout("10 GOTO 100\n");
    Ok(())
}

#[test]
fn detokenize_truncated() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("acornkit")?;
    cmd.arg("detokenize")
        .arg("-t").arg("btok")
        .write_stdin(GOTO_100[0..11].to_vec())
        .assert()
        .success()
        .stdout("10 GOTO 100\n")
        .stderr(predicate::str::contains("truncated"));
    Ok(())
}

#[test]
fn program_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let program = std::fs::read_to_string(Path::new("tests").join("test.bas"))?;
    let tokens = Command::cargo_bin("acornkit")?
        .arg("tokenize")
        .arg("-t").arg("btxt")
        .write_stdin(program.clone())
        .output()?
        .stdout;
    assert_eq!(tokens[0],0x0d);
    let mut cmd = Command::cargo_bin("acornkit")?;
    cmd.arg("detokenize")
        .arg("-t").arg("btok")
        .write_stdin(tokens)
        .assert()
        .success()
        .stdout(program.into_bytes());
    Ok(())
}

#[test]
fn invalid_item_type() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("acornkit")?;
    cmd.arg("tokenize")
        .arg("-t").arg("xtxt")
        .write_stdin("10 END\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("xtxt"));
    Ok(())
}

#[test]
fn bad_goto_operand() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("acornkit")?;
    cmd.arg("tokenize")
        .arg("-t").arg("btxt")
        .write_stdin("10 GOTO 40000\n")
        .assert()
        .failure();
    Ok(())
}

#[test]
fn keyword_listing() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("acornkit")?;
    cmd.arg("keywords")
        .arg("--flag").arg("stop")
        .assert()
        .success()
        .stdout(predicate::str::contains("REM").and(predicate::str::contains("DATA")))
        .stdout(predicate::str::contains("PRINT").not());
    Ok(())
}

#[test]
fn pack_and_unpack() -> Result<(), Box<dyn std::error::Error>> {
    let dat: Vec<u8> = (0..600).map(|i| (i % 256) as u8).collect();
    let json_str = Command::cargo_bin("acornkit")?
        .arg("pack")
        .arg("-t").arg("btok")
        .arg("-n").arg("DATA")
        .arg("-a").arg("1900")
        .write_stdin(dat.clone())
        .output()?
        .stdout;
    let json_str = String::from_utf8(json_str)?;
    assert!(json_str.contains("\"load_addr\":\"00001900\""));
    assert!(json_str.contains("\"role\":\"first\""));
    let mut cmd = Command::cargo_bin("acornkit")?;
    cmd.arg("unpack")
        .write_stdin(json_str.clone())
        .assert()
        .success()
        .stdout(dat);
    let mut cmd = Command::cargo_bin("acornkit")?;
    cmd.arg("blocks")
        .write_stdin(json_str)
        .assert()
        .success()
        .stdout(predicate::str::contains("00001900").and(predicate::str::contains("last")));
    Ok(())
}

#[test]
fn pack_atom() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("acornkit")?;
    cmd.arg("pack")
        .arg("-t").arg("atok")
        .arg("-n").arg("game")
        .arg("--lock")
        .write_stdin(vec![0x0d,0xff])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\":\"GAME\"")
            .and(predicate::str::contains("\"load_addr\":\"00002900\""))
            .and(predicate::str::contains("\"locked\":true")));
    Ok(())
}
