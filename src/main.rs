fn main() {
    if let Err(err) = famtree::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
