//! BBC BASIC II keyword table.
//! Order matters, abbreviations go to the first keyword in this list that shares the prefix.

use super::dictionary::TokenFlags;

const N: TokenFlags = TokenFlags::NONE;
const C: TokenFlags = TokenFlags::CONDITIONAL;
const M: TokenFlags = TokenFlags::MIDDLE_OF_STATEMENT;
const S: TokenFlags = TokenFlags::START_OF_STATEMENT;
const F: TokenFlags = TokenFlags::FN_OR_PROC_NAME;
const L: TokenFlags = TokenFlags::GOTO_LINE_OPERAND;
const R: TokenFlags = TokenFlags::STOP_TOKENISE;
const P: TokenFlags = TokenFlags::ASSIGNMENT_VARIANT;

pub const BBC_KEYWORDS: [(&str,u8,TokenFlags);121] = [
    ("AND",0x80,N),
    ("ABS",0x94,N),
    ("ACS",0x95,N),
    ("ADVAL",0x96,N),
    ("ASC",0x97,N),
    ("ASN",0x98,N),
    ("ATN",0x99,N),
    ("AUTO",0xc6,L),
    ("BGET",0x9a,C),
    ("BPUT",0xd5,C.with(M)),
    ("COLOUR",0xfb,M),
    ("CALL",0xd6,M),
    ("CHAIN",0xd7,M),
    ("CHR$",0xbd,N),
    ("CLEAR",0xd8,C),
    ("CLOSE",0xd9,C.with(M)),
    ("CLG",0xda,C),
    ("CLS",0xdb,C),
    ("COS",0x9b,N),
    ("COUNT",0x9c,C),
    ("DATA",0xdc,R),
    ("DEG",0x9d,N),
    ("DEF",0xdd,N),
    ("DELETE",0xc7,L),
    ("DIV",0x81,N),
    ("DIM",0xde,M),
    ("DRAW",0xdf,M),
    ("ENDPROC",0xe1,C),
    ("END",0xe0,C),
    ("ENVELOPE",0xe2,M),
    ("ELSE",0x8b,L.with(S)),
    ("EVAL",0xa0,N),
    ("ERL",0x9e,C),
    ("ERROR",0x85,S),
    ("EOF",0xc5,C),
    ("EOR",0x82,N),
    ("ERR",0x9f,C),
    ("EXP",0xa1,N),
    ("EXT",0xa2,C),
    ("FOR",0xe3,M),
    ("FALSE",0xa3,C),
    ("FN",0xa4,F),
    ("GOTO",0xe5,L.with(M)),
    ("GET$",0xbe,N),
    ("GET",0xa5,N),
    ("GOSUB",0xe4,L.with(M)),
    ("GCOL",0xe6,M),
    ("HIMEM",0x93,P.with(M).with(C)),
    ("INPUT",0xe8,M),
    ("IF",0xe7,M),
    ("INKEY$",0xbf,N),
    ("INKEY",0xa6,N),
    ("INT",0xa8,N),
    ("INSTR(",0xa7,N),
    ("LIST",0xc9,L),
    ("LINE",0x86,N),
    ("LOAD",0xc8,M),
    ("LOMEM",0x92,P.with(M).with(C)),
    ("LOCAL",0xea,M),
    ("LEFT$(",0xc0,N),
    ("LEN",0xa9,N),
    ("LET",0xe9,S),
    ("LOG",0xab,N),
    ("LN",0xaa,N),
    ("MID$(",0xc1,N),
    ("MODE",0xeb,M),
    ("MOD",0x83,N),
    ("MOVE",0xec,M),
    ("NEXT",0xed,M),
    ("NEW",0xca,C),
    ("NOT",0xac,N),
    ("OLD",0xcb,C),
    ("ON",0xee,M),
    ("OFF",0x87,N),
    ("OR",0x84,N),
    ("OPENIN",0x8e,N),
    ("OPENOUT",0xae,N),
    ("OPENUP",0xad,N),
    ("OSCLI",0xff,M),
    ("PRINT",0xf1,M),
    ("PAGE",0x90,P.with(M).with(C)),
    ("PTR",0x8f,P.with(M).with(C)),
    ("PI",0xaf,C),
    ("PLOT",0xf0,M),
    ("POINT(",0xb0,N),
    ("PROC",0xf2,F.with(M)),
    ("POS",0xb1,C),
    ("RETURN",0xf8,C),
    ("REPEAT",0xf5,N),
    ("REPORT",0xf6,C),
    ("READ",0xf3,M),
    ("REM",0xf4,R),
    ("RUN",0xf9,C),
    ("RAD",0xb2,N),
    ("RESTORE",0xf7,L.with(M)),
    ("RIGHT$(",0xc2,N),
    ("RND",0xb3,C),
    ("RENUMBER",0xcc,L),
    ("STEP",0x88,N),
    ("SAVE",0xcd,M),
    ("SGN",0xb4,N),
    ("SIN",0xb5,N),
    ("SQR",0xb6,N),
    ("SPC",0x89,N),
    ("STR$",0xc3,N),
    ("STRING$(",0xc4,N),
    ("SOUND",0xd4,M),
    ("STOP",0xfa,C),
    ("TAN",0xb7,N),
    ("THEN",0x8c,L.with(S)),
    ("TO",0xb8,N),
    ("TAB(",0x8a,N),
    ("TRACE",0xfc,L.with(M)),
    ("TIME",0x91,P.with(M).with(C)),
    ("TRUE",0xb9,C),
    ("UNTIL",0xfd,M),
    ("USR",0xba,N),
    ("VDU",0xef,M),
    ("VAL",0xbb,N),
    ("VPOS",0xbc,C),
    ("WIDTH",0xfe,M)
];
