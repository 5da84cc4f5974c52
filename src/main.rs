fn main() -> anyhow::Result<()> {
    conversation_collector::cli::run()
}
