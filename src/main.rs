fn main() {
    modgraph::cli::run();
}
