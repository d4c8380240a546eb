fn main() {
    logic_tutor::cli::bin::cli()
}
