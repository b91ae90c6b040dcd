use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();
    simon::ui::start()
}
