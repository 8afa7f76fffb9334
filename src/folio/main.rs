mod cli;

fn main() {
    if let Err(e) = cli::run() {
        if e.is_validation() {
            eprintln!("{}", e);
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}
