fn main() {
    corvid::cli::run();
}
