fn main() -> anyhow::Result<()> {
    pricecast::run()
}
