// edkit - Main entry point
use clap::Parser;
use edkit::cli::Cli;
use edkit::logging::LogConfig;
use std::process;

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.run() {
        Ok(code) => code,
        Err(e) => {
            let colors = LogConfig::from_cli(cli.verbose, cli.quiet, cli.color.clone())
                .should_use_colors();
            eprintln!("{}", e.user_message(colors));
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
