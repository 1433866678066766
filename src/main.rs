use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = blueprints::cli::parse();
    app::run(args)
}
