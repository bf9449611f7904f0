use anyhow::Result;
use clap::Parser as _;

use iscript::cli;
use iscript::logging;
use iscript::mode::Mode;
use iscript::parser::Parser;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose);

    match args.command {
        cli::Command::Install(opts) => {
            let engine = Parser::new(&opts.script, &opts.root)?;
            engine.start(Mode::Install, Some(&opts.source))
        }
        cli::Command::Remove(opts) => {
            let engine = Parser::new(&opts.script, &opts.root)?;
            engine.start(Mode::Remove, None)
        }
        cli::Command::Update(opts) => {
            let engine = Parser::new(&opts.script, &opts.root)?;
            engine.start(Mode::Update, Some(&opts.source))
        }
    }
}
