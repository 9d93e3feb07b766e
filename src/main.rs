use std::env;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: chordsheet <input.txt>");
        eprintln!("       chordsheet <input.txt> --transpose N [--flats]");
        process::exit(1);
    }

    let input_path = &args[1];
    let mut offset: Option<i32> = None;
    let mut prefer_flats = false;

    // Parse flags
    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--transpose" => {
                let value = match rest.next().map(|v| v.parse::<i32>()) {
                    Some(Ok(n)) => n,
                    _ => {
                        eprintln!("--transpose requires an integer argument");
                        process::exit(1);
                    }
                };
                offset = Some(value);
            }
            "--flats" => prefer_flats = true,
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
    }

    // Read input file
    let raw = match fs::read_to_string(input_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", input_path, e);
            process::exit(1);
        }
    };

    let sheet = chordsheet::parse(&raw);

    // Output
    match offset {
        Some(n) => {
            println!("{}", chordsheet::transpose_sheet(&sheet.chords, n, prefer_flats));
        }
        None => {
            let json = match serde_json::to_string_pretty(&sheet) {
                Ok(json) => json,
                Err(e) => {
                    eprintln!("Error serializing sheet: {}", e);
                    process::exit(1);
                }
            };
            println!("{}", json);
        }
    }
}
