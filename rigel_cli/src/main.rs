// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod theme;

use clap::Parser as ClapParser;
use cliclack::{input, intro, set_theme};
use console::Style;
use rigel_vm::Interpreter;
use theme::DefaultTheme;

/// An ECMAScript 5.1 interpreter
#[derive(Debug, ClapParser)]
#[command(name = "rigel")]
#[command(about = "An ECMAScript 5.1 interpreter", long_about = None)]
struct Cli {
    /// Evaluate a string of source text.
    #[arg(short = 'e', long = "eval", value_name = "SOURCE")]
    eval: Option<String>,

    /// Script files, executed in order in one shared context. With no
    /// files and no --eval, a REPL opens.
    paths: Vec<String>,
}

fn main() {
    let args = Cli::parse();
    let mut interpreter = Interpreter::new();

    if let Some(source) = &args.eval {
        run_source(&mut interpreter, source, "<eval>");
    }

    if !args.paths.is_empty() {
        for path in &args.paths {
            let source = match std::fs::read_to_string(path) {
                Ok(source) => source,
                Err(error) => {
                    eprintln!("rigel: {path}: {error}");
                    std::process::exit(1);
                }
            };
            run_source(&mut interpreter, &source, path);
        }
        return;
    }

    if args.eval.is_some() {
        return;
    }

    repl(&mut interpreter);
}

/// Execute one source; exit non-zero on a parse error or uncaught throw.
fn run_source(interpreter: &mut Interpreter, source: &str, filename: &str) {
    match interpreter.execute_string(source, Some(filename)) {
        Err(parse_error) => {
            eprintln!("{}", Style::new().red().apply_to(parse_error));
            std::process::exit(1);
        }
        Ok(value) => {
            if interpreter.is_error_value(value) {
                let rendered = interpreter.to_display_string(value);
                eprintln!("Uncaught {rendered}");
                std::process::exit(1);
            }
        }
    }
}

fn repl(interpreter: &mut Interpreter) {
    set_theme(DefaultTheme);
    println!("\n");
    let mut placeholder = "Enter a line of JavaScript".to_string();

    // Register a signal handler for Ctrl+C.
    let _ = ctrlc::set_handler(|| {
        std::process::exit(0);
    });

    loop {
        if intro("Rigel Repl").is_err() {
            std::process::exit(0);
        }
        let line: String = match input("").placeholder(&placeholder).interact() {
            Ok(line) => line,
            Err(_) => std::process::exit(0),
        };
        if line.trim() == "exit" {
            std::process::exit(0);
        }
        placeholder = line.clone();
        match interpreter.execute_string(&line, Some("<stdin>")) {
            Err(parse_error) => {
                eprintln!("{}", Style::new().red().apply_to(parse_error));
            }
            Ok(value) => {
                if interpreter.is_error_value(value) {
                    let rendered = interpreter.to_display_string(value);
                    eprintln!("Uncaught {rendered}");
                } else {
                    println!("{}\n", interpreter.inspect(value));
                }
            }
        }
    }
}
