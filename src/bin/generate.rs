use std::path::{Path, PathBuf};

use wfc2d::rulefile::load_rules_file;
use wfc2d::solve::{SolveLimits, SolveResult, Solver};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        eprintln!(
            "Usage: generate <rules-file> <rows> <cols> [--seed <S>] [--max-iters <N>] \
             [--restarts <N>] [--json <out-file>]"
        );
        std::process::exit(2);
    }

    let rules_path = Path::new(&args[1]);
    let rows: usize = parse_arg(&args[2], "rows");
    let cols: usize = parse_arg(&args[3], "cols");

    let mut seed: u64 = 0;
    let mut limits = SolveLimits::default();
    let mut restarts: u32 = 1;
    let mut json_out: Option<PathBuf> = None;

    let mut i = 4;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                seed = parse_opt(&args, i, "--seed");
                i += 2;
            }
            "--max-iters" => {
                limits.max_iterations = parse_opt(&args, i, "--max-iters");
                i += 2;
            }
            "--restarts" => {
                restarts = parse_opt(&args, i, "--restarts");
                i += 2;
            }
            "--json" => {
                let Some(path) = args.get(i + 1) else {
                    eprintln!("--json requires an output file argument");
                    std::process::exit(2);
                };
                json_out = Some(PathBuf::from(path));
                i += 2;
            }
            x => {
                eprintln!("Unknown option: {x}");
                std::process::exit(2);
            }
        }
    }

    let (ruleset, diagnostics) = match load_rules_file(rules_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load rules from {}: {e}", rules_path.display());
            std::process::exit(1);
        }
    };
    for d in &diagnostics {
        eprintln!("{}:{}: {}", rules_path.display(), d.line, d.message);
    }

    let mut solver = Solver::new(&ruleset);
    if let Err(e) = solver.initialize(rows, cols) {
        eprintln!("Failed to initialize {rows}x{cols} wave: {e}");
        std::process::exit(1);
    }

    let result = match solver.run_with_restarts(seed, limits, restarts) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Solve failed: {e}");
            std::process::exit(1);
        }
    };

    match result {
        SolveResult::Solved(grid) => {
            if let Some(path) = json_out {
                let json = serde_json::to_string_pretty(&grid)
                    .expect("output grid serializes to JSON");
                if let Err(e) = std::fs::write(&path, json) {
                    eprintln!("Failed to write {}: {e}", path.display());
                    std::process::exit(1);
                }
                println!("Wrote {}x{} grid to {}", rows, cols, path.display());
            } else {
                for row in 0..rows {
                    let line: Vec<String> = (0..cols)
                        .map(|col| match grid[row * cols + col] {
                            Some(tile) => tile.to_string(),
                            None => ".".to_string(),
                        })
                        .collect();
                    println!("{}", line.join(" "));
                }
            }
        }
        SolveResult::Contradicted { index } => {
            eprintln!("Contradiction at cell {index}; retry with a different --seed");
            std::process::exit(1);
        }
        SolveResult::Exhausted { iterations } => {
            eprintln!("Gave up after {iterations} iterations; raise --max-iters");
            std::process::exit(1);
        }
    }
}

fn parse_arg<T: std::str::FromStr>(value: &str, name: &str) -> T {
    match value.parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("invalid {name}: {value}");
            std::process::exit(2);
        }
    }
}

fn parse_opt<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    let Some(value) = args.get(i + 1) else {
        eprintln!("{flag} requires an argument");
        std::process::exit(2);
    };
    parse_arg(value, flag)
}
