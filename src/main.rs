fn main() -> anyhow::Result<()> {
    laundro_listings::cli::run()
}
