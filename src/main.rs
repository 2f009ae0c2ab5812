fn main() {
    solast::cli::run();
}
