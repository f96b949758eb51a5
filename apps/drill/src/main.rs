fn main() {
    if let Err(e) = vocab_drill::run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
