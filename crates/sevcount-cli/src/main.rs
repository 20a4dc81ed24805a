//! sevcount CLI - severity bucketing and frequency tables.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Classify { spec, scores } => commands::classify::run(&spec, &scores),

        Commands::Annotate {
            file,
            spec,
            measure,
            output,
            format,
        } => commands::annotate::run(file, &spec, &measure, output, format, cli.verbose),

        Commands::Count {
            file,
            spec,
            measure,
            columns,
            exclude,
            json,
            output_dir,
        } => commands::count::run(
            commands::count::CountArgs {
                file,
                spec,
                measure,
                columns,
                exclude,
                json,
                output_dir,
            },
            cli.verbose,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
