fn main() -> anyhow::Result<()> {
    dotaconst::cli::run_cli()
}
