//! LPL command line driver
//!
//! Usage:
//!   lpl [--print_tokens] <script.lpl>

use std::env;
use std::path::Path;
use std::process;

use colored::Colorize;
use tracing_subscriber::EnvFilter;

use lpl::{Interpreter, Options, VERSION};

fn main() {
    init_logging();

    let args: Vec<String> = env::args().skip(1).collect();

    let (options, script) = match args.as_slice() {
        [flag] if flag == "-h" || flag == "--help" => {
            print_help();
            return;
        }
        [flag] if flag == "-V" || flag == "--version" => {
            println!("lpl {}", VERSION);
            return;
        }
        [flag, script] if flag == "--print_tokens" => (Options { print_tokens: true }, script),
        [script] if !script.starts_with('-') => (Options::default(), script),
        _ => {
            eprintln!("{} : invalid arguments", "error".red().bold());
            print_usage();
            process::exit(1);
        }
    };

    let mut interpreter = Interpreter::new().with_options(options);
    if let Err(e) = interpreter.run_file(Path::new(script)) {
        eprintln!("{} : {}", "error".red().bold(), e);
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    eprintln!("{}", "USAGE:".yellow());
    eprintln!("  lpl [--print_tokens] <script.lpl>");
}

fn print_help() {
    println!("{} {}", "lpl".cyan().bold(), VERSION);
    println!("A line-oriented scripting language\n");
    println!("{}", "USAGE:".yellow());
    println!("  lpl [--print_tokens] <script.lpl>\n");
    println!("{}", "OPTIONS:".yellow());
    println!("  --print_tokens   Print each line's tokens before running it");
    println!("  -h, --help       Show this help message");
    println!("  -V, --version    Show version\n");
    println!("{}", "LANGUAGE:".yellow());
    println!("  const PI, 3          Constant");
    println!("  var n, 10            Variable");
    println!("  + 2, 3               Arithmetic into the register (also add/sub/mul/div)");
    println!("  echo \"pi=\", PI, ^    Print values, ^ is the register");
    println!("  read \"name? \"        Read a line into the register");
    println!("  proc f ... end       Define a procedure, call it with run f");
    println!("  import \"lib.lpl\"     Run another file");
}
