fn main() {
    seqcall::cli::run();
}
