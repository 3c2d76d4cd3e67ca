fn main() {
    env_logger::init();

    if let Err(e) = dispatch::modules::run() {
        eprintln!("STOPPING PROGRAM: {}", e);
        std::process::exit(1);
    }
}
