fn main() {
    sfml_me::app::cli::run();
}
