#![forbid(unsafe_code)]

fn main() {
    let line = vkb::run_from_env().and_then(|outcome| {
        if let Some(dump) = &outcome.dump {
            eprint!("{dump}");
        }
        outcome.result_line()
    });
    match line {
        Ok(line) => print!("{line}"),
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(error.exit_code());
        }
    }
}
