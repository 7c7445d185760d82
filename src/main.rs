use clap::Parser;
use reelvault::cli::commands;
use reelvault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Upload {
            ref file,
            protect,
            ref name,
        } => commands::upload::execute(&cli, file, protect, name.as_deref()),
        Commands::List { json } => commands::list::execute(&cli, json),
        Commands::Download {
            ref name,
            ref output,
        } => commands::download::execute(&cli, name, output.as_deref()),
        Commands::Decrypt {
            ref name,
            ref output,
        } => commands::decrypt::execute(&cli, name, output.as_deref()),
        Commands::Verify { ref name, deep } => commands::verify::execute(&cli, name, deep),
        Commands::Delete { ref name, force } => commands::delete::execute(&cli, name, force),
        Commands::Stats => commands::stats::execute(&cli),
        Commands::Audit { last, ref since } => {
            commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
        Commands::Completions { shell } => commands::completions::execute(shell),
        Commands::Version => commands::version::execute(),
    };

    if let Err(e) = result {
        reelvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
