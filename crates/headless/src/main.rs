use clap::Parser;

use agarium_headless::Args;

fn main() -> anyhow::Result<()> {
    agarium_headless::run(Args::parse())
}
