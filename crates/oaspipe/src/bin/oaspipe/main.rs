mod cli;

use oaspipe::document::{Document, Format};
use oaspipe::pipeline::Pipeline;
use oaspipe::resolve::PathAccess;
use oaspipe::value::Node;

fn main() {
    use clap::Parser;
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("OASPIPE_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let command_result = match cli.command {
        cli::Command::Transform(transform_cli) => transform(transform_cli),
        cli::Command::Get(get_cli) => get(get_cli),
        cli::Command::Dev(dev_cli) => dev(dev_cli),
    };

    if let Err(e) = command_result {
        for error in e.chain() {
            eprintln!("{error}")
        }
        std::process::exit(1);
    }
}

pub fn transform(cli: cli::TransformCommand) -> anyhow::Result<()> {
    let document = load(&cli.input)?;
    let document = Pipeline::fleet().run(document);

    let rendered = match cli.output.format {
        cli::OutputFormat::Yaml => document.to_yaml()?,
        cli::OutputFormat::Json => document.to_json_pretty()?,
    };
    write(&cli.output, rendered)
}

pub fn get(cli: cli::GetCommand) -> anyhow::Result<()> {
    let mut document = load(&cli.input)?;
    if cli.transformed {
        document = Pipeline::fleet().run(document);
    }

    let Some(node) = document.fields().get_path(&cli.path) else {
        anyhow::bail!("Path not found: {}", cli.path);
    };

    let rendered = match cli.output.format {
        cli::OutputFormat::Yaml => serde_yaml::to_string(node)?,
        cli::OutputFormat::Json => serde_json::to_string_pretty(node)? + "\n",
    };
    write(&cli.output, rendered)
}

fn load(input: &cli::InputArgs) -> anyhow::Result<Document> {
    let document = match &input.file {
        Some(file_path) => Document::load_file(file_path)?,
        None => {
            let format = match input.format {
                cli::InputFormat::Json => Format::Json,
                cli::InputFormat::Yaml => Format::Yaml,
            };
            Document::from_reader(std::io::stdin(), format)?
        }
    };

    Ok(document)
}

fn write(output: &cli::OutputArgs, rendered: String) -> anyhow::Result<()> {
    match &output.file {
        Some(file_path) => {
            std::fs::write(file_path, rendered)?;
            tracing::info!(path=%file_path.display(), "document written");
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

/// (oaspipe-)developer utilities
///
/// A quick way to expose internal structures for debugging purposes
pub fn dev(cli: cli::DevCommand) -> anyhow::Result<()> {
    match cli.command {
        cli::DevSubCommand::Steps => {
            for (index, name) in Pipeline::fleet().step_names().enumerate() {
                println!("{}. {name}", index + 1);
            }
        }
        cli::DevSubCommand::Document => {
            let document = load(&cli.input)?;
            println!("{:#?}", Node::Mapping(document.into_fields()));
        }
    }

    Ok(())
}
