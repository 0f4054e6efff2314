mod commands;
mod input;
mod terminal;

use commands::CommandLine;
use terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let cfg = commands.to_config();

    logging::init_logging(cfg.verbose);
    if cfg.no_color {
        colored::control::set_override(false);
    }

    let inputs: Vec<String> = input::collect_inputs(commands.target);
    commands::lookup::lookup(inputs, &cfg).await
}
