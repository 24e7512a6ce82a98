fn main() {
    orgchart::cli::run();
}
