use clap::Parser;
use notepub::application::{
    init::init, ConfigService, ExportFormat, ExportOptions, ExportService, ListTagsService,
    PublishService,
};
use notepub::cli::{
    format_config, format_export_outcome, format_publish_report, format_tag_tree, Cli, Commands,
};
use notepub::error::NotepubError;
use notepub::infrastructure::{FileSystemRepository, NoteRepository};
use std::str::FromStr;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), NotepubError> {
    match cli.command {
        Commands::Init { path } => init(&path),
        Commands::Config { key, value, list } => {
            let service = ConfigService::new(FileSystemRepository::discover()?);

            if list {
                print!("{}", format_config(&service.list()?));
                return Ok(());
            }
            match (key, value) {
                (Some(k), Some(v)) => {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                }
                (Some(k), None) => println!("{}", service.get(&k)?),
                (None, _) => {
                    println!("Usage: notepub config [--list | <key> [<value>]]");
                }
            }
            Ok(())
        }
        Commands::Tags => {
            let service = ListTagsService::new(FileSystemRepository::discover()?);
            let tags = service.execute()?;
            let output = format_tag_tree(&tags);
            if output.ends_with('\n') {
                print!("{}", output);
            } else {
                println!("{}", output);
            }
            Ok(())
        }
        Commands::Export {
            format,
            output,
            select,
            suppress,
        } => {
            let format = ExportFormat::from_str(&format)?;
            let repo = FileSystemRepository::discover()?;
            let config = repo.load_config()?;
            let notes = repo.load_notes();

            let mut options = ExportOptions::from_config(&config);
            if let Some(spec) = select {
                options = options.with_select(&spec);
            }
            if let Some(spec) = suppress {
                options = options.with_suppress(&spec);
            }

            let outcome = ExportService::new(&notes, options).export(format, &output)?;
            println!("{}", format_export_outcome(&outcome, format, &output));
            Ok(())
        }
        Commands::Publish { dest } => {
            let repo = FileSystemRepository::discover()?;
            let config = repo.load_config()?;
            let notes = repo.load_notes();
            let dest = dest.unwrap_or_else(|| repo.root().join("public"));

            let options = ExportOptions::from_config(&config);
            let service = PublishService::new(&notes, options, &config.publish.index_file);
            let report = service.publish(&dest)?;
            print!("{}", format_publish_report(&report));
            Ok(())
        }
    }
}
