use clap::{App, Arg};
use log::info;
use plsat::formula::{dimacs, read_formula, text, Format, Formula, ParseError};
use plsat::*;
use std::path::Path;
use std::time::Instant;

fn main() {
    env_logger::init();

    let matches = App::new("plsat")
        .about("Decides satisfiability of propositional formulas in CNF")
        .arg(Arg::with_name("INPUT").help("input file (stdin if absent)").index(1))
        .arg(
            Arg::with_name("algorithm")
                .long("algorithm")
                .short("a")
                .takes_value(true)
                .possible_values(&["dpll", "brute"])
                .default_value("dpll")
                .help("search procedure"),
        )
        .arg(
            Arg::with_name("format")
                .long("format")
                .short("f")
                .takes_value(true)
                .possible_values(&["text", "dimacs"])
                .help("input syntax; inferred from the file extension by default"),
        )
        .arg(
            Arg::with_name("stats")
                .long("stats")
                .help("print search statistics (dpll only)"),
        )
        .get_matches();

    let format = matches.value_of("format").and_then(Format::from_name);
    let f = match matches.value_of("INPUT") {
        Some(path) => {
            let format = format.unwrap_or_else(|| Format::from_path(Path::new(path)));
            read_formula(path, format)
        }
        None => parse_stdin(format.unwrap_or(Format::Text)),
    };

    let f = match f {
        Ok(f) => f,
        Err(e) => {
            eprintln!("parse error: {}", e);
            std::process::exit(-1);
        }
    };

    println!("{}", f);
    info!(
        "{} clauses over {} variables",
        f.num_clauses(),
        f.universe().len()
    );

    let start = Instant::now();
    let (result, stats) = match matches.value_of("algorithm") {
        Some("brute") => (brute_force::solve(&f), None),
        _ => {
            let mut solver = Solver::new(&f);
            let result = solver.solve();
            (result, Some(*solver.stats()))
        }
    };
    let elapsed = start.elapsed();

    match &result {
        Some(assignment) => print!("{}", assignment),
        None => println!("No solution"),
    }
    println!("duration = {} ms", elapsed.as_millis());
    if let (true, Some(stats)) = (matches.is_present("stats"), stats) {
        println!("{}", stats);
    }

    let exit_code = match result {
        Some(_) => 0,
        None => 1,
    };
    std::process::exit(exit_code);
}

fn parse_stdin(format: Format) -> Result<Formula, ParseError> {
    match format {
        Format::Text => text::parse_reader(std::io::stdin()),
        Format::Dimacs => dimacs::parse(std::io::stdin()),
    }
}
