fn main() {
    if let Err(err) = railmap_layout::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
