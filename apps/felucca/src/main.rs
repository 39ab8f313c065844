fn main() {
    std::process::exit(felucca_cli::run_cli());
}
