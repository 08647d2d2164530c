mod cli;

use hcljson::convert::Options;
use hcljson::document::HclDocument;
use hcljson::value::Value;

fn main() {
    use clap::Parser;
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("HCLJSON_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let command_result = match cli.command {
        cli::Command::Convert(convert_cli) => convert(convert_cli),
        cli::Command::Attributes(attributes_cli) => attributes(attributes_cli),
        cli::Command::Validate(validate_cli) => validate(validate_cli),
    };

    if let Err(e) = command_result {
        for error in e.chain() {
            eprintln!("{error}")
        }
        std::process::exit(1);
    }
}

pub fn convert(cli: cli::ConvertCommand) -> anyhow::Result<()> {
    let document = load(&cli.input)?;
    let options = Options::default()
        .keep_interpolation(cli.keep_interpolation)
        .max_depth(cli.max_depth);

    let object = document.convert(&options)?;

    output(&cli.output, &Value::Object(object))?;
    Ok(())
}

pub fn attributes(cli: cli::AttributesCommand) -> anyhow::Result<()> {
    let document = load(&cli.input)?;
    let (object, diagnostics) = document.convert_top_level_attributes(&Options::default());

    output(&cli.output, &Value::Object(object))?;

    for issue in diagnostics.issues() {
        eprintln!("{issue}");
    }
    anyhow::ensure!(
        diagnostics.is_empty(),
        "{} attribute(s) skipped",
        diagnostics.issues().len()
    );

    Ok(())
}

pub fn validate(cli: cli::ValidateCommand) -> anyhow::Result<()> {
    let text = read(&cli.input)?;
    hcljson::api::validate(&text)?;

    println!("valid HCL");
    Ok(())
}

fn read(input: &cli::InputArgs) -> anyhow::Result<String> {
    match &input.file {
        Some(file_path) => Ok(std::fs::read_to_string(file_path)?),
        None => Ok(std::io::read_to_string(std::io::stdin())?),
    }
}

fn load(input: &cli::InputArgs) -> anyhow::Result<HclDocument> {
    match &input.file {
        Some(file_path) => Ok(HclDocument::load_file(file_path)?),
        None => {
            let stdin = std::io::read_to_string(std::io::stdin())?;
            Ok(HclDocument::parse(stdin)?)
        }
    }
}

fn output(output: &cli::OutputArgs, value: &Value) -> anyhow::Result<()> {
    match output.format {
        cli::OutputFormat::Yaml => serde_yaml::to_writer(std::io::stdout(), value)?,
        cli::OutputFormat::Json => {
            serde_json::to_writer_pretty(std::io::stdout(), value)?;
            println!();
        }
    };

    Ok(())
}
