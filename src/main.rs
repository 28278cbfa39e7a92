use clap::Parser;
use haushalt_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(stats) => {
            // Stats have already been reported by the command
            if stats.documents_failed > 0 {
                process::exit(2);
            }
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Haushalt Processor - Municipal Budget Table Converter");
    println!("=====================================================");
    println!();
    println!("Parse the Ergebnishaushalt, Finanzhaushalt and Investitionsübersicht tables");
    println!("of municipal budget documents and export them as flat CSV files.");
    println!();
    println!("USAGE:");
    println!("    haushalt-processor <COMMAND> [OPTIONS] <INPUT>...");
    println!();
    println!("COMMANDS:");
    println!("    process     Parse documents and write the CSV exports (main command)");
    println!("    registry    Print the Teilhaushalt / Produktbereich / Produktgruppe registry");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Export all documents of a directory:");
    println!("    haushalt-processor process documents/ --output exports");
    println!();
    println!("    # Tolerate broken rows and include summary positions:");
    println!("    haushalt-processor process 'documents/*.json' --row-policy tolerant \\");
    println!("                               --include-summaries");
    println!();
    println!("    # Print the registry as JSON:");
    println!("    haushalt-processor registry documents/ --format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    haushalt-processor <COMMAND> --help");
}
