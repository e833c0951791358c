fn main() {
    cmdtree::cli::run();
}
