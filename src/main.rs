fn main() -> anyhow::Result<()> {
    intake_lib::run()
}
