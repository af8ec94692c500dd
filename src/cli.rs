use clap::{value_parser, crate_version, Arg, ArgAction, Command};

const T_LONG_HELP: &str = "The first letter of the type selects the machine, `a` for the Acorn Atom
and `b` for the BBC Micro.  Text types are program listings, token types are the program as it is
stored in memory.";
const ADDR_HELP: &str = "hex, optionally prefixed by `0x`, `$` or `&`";

fn type_arg(types: [&'static str;2]) -> Arg {
    Arg::new("type").short('t').long("type").value_name("TYPE").help("type of the item")
        .long_help(T_LONG_HELP)
        .value_parser(types)
        .required(true)
}

fn console_arg() -> Arg {
    Arg::new("console").long("console").help("format for console unconditionally")
        .required(false)
        .action(ArgAction::SetTrue)
        .long_help("even if the output context is a file or pipe, format it for the console")
}

fn indent_arg() -> Arg {
    Arg::new("indent").long("indent").help("JSON indentation, omit to minify")
        .value_name("SPACES")
        .value_parser(value_parser!(u16).range(0..16))
        .required(false)
}

pub fn build_cli() -> Command {
    let long_help = "acornkit is always invoked with exactly one of several subcommands.
The subcommands are generally designed to function as nodes in a pipeline.
Set RUST_LOG environment variable to control logging level.
  levels: trace,debug,info,warn,error

Examples:
---------
tokenize to file:      `acornkit tokenize -t btxt < prog.bas > prog.btok`
detokenize:            `acornkit detokenize -t btok < prog.btok`
pack for tape:         `acornkit tokenize -t btxt < prog.bas | acornkit pack -t btok -n PROG > prog.json`
unpack and list:       `acornkit unpack < prog.json | acornkit detokenize -t btok`
inspect blocks:        `acornkit blocks < prog.json`";

    let mut main_cmd = Command::new("acornkit")
        .about("Converts Acorn Atom and BBC Micro BASIC programs and packs them into tape files.")
        .after_long_help(long_help)
        .version(crate_version!());

    main_cmd = main_cmd.subcommand(
        Command::new("tokenize")
            .arg(type_arg(["atxt","btxt"]))
            .arg(console_arg())
            .visible_alias("tok")
            .about("read from stdin, tokenize, write to stdout"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("detokenize")
            .arg(type_arg(["atok","btok"]))
            .visible_alias("dtok")
            .about("read from stdin, detokenize, write to stdout"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("keywords")
            .arg(Arg::new("flag").long("flag").value_name("FLAG").help("only list keywords with this flag")
                .value_parser(["conditional","middle","start","name","line","stop","assignment"])
                .required(false))
            .about("list the BBC BASIC keywords with their tokens and abbreviations"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("pack")
            .arg(type_arg(["atok","btok"]))
            .arg(Arg::new("name").short('n').long("name").value_name("NAME").help("name of the file on tape")
                .required(true))
            .arg(Arg::new("addr").short('a').long("addr").value_name("ADDRESS").help("load address")
                .long_help(ADDR_HELP)
                .required(false))
            .arg(Arg::new("exec").short('x').long("exec").value_name("ADDRESS").help("execution address")
                .long_help(ADDR_HELP)
                .required(false))
            .arg(Arg::new("lock").long("lock").help("mark the blocks locked").action(ArgAction::SetTrue))
            .arg(indent_arg())
            .about("read tokens from stdin, write tape file JSON to stdout"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("unpack")
            .arg(console_arg())
            .about("read tape file JSON from stdin, write its data to stdout"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("blocks")
            .about("read tape file JSON from stdin, list its blocks"),
    );
    main_cmd
}
