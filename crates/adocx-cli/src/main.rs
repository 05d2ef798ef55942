use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use adocx_config::{Config, OutputFormat};
use adocx_engine::{
    AttributeTable, HtmlOptions, Parser, convert_markdown_to_asciidoc, to_html, to_xml,
};
use anyhow::{Context, Result, bail};
use clap::{Parser as ClapParser, ValueEnum};

#[derive(Debug, ClapParser)]
#[command(name = "adocx", version, about = "Convert AsciiDoc and Markdown to HTML or XML")]
struct Cli {
    /// Config file (defaults to ~/.config/adocx/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format, overriding the config file
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Emit full HTML documents instead of fragments
    #[arg(long)]
    standalone: bool,

    /// Emit XHTML (implies --standalone)
    #[arg(long)]
    xhtml: bool,

    /// Seed a document attribute. Repeatable.
    #[arg(short = 'a', long = "attribute", value_name = "NAME=VALUE", value_parser = parse_attribute)]
    attributes: Vec<(String, String)>,

    /// Output file for a single input, output directory for several
    #[arg(short, long, value_name = "OUT")]
    output: Option<PathBuf>,

    /// AsciiDoc (.adoc) or Markdown (.md) files
    #[arg(required = true, value_name = "INPUT")]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Html,
    Xml,
    Adoc,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Html => OutputFormat::Html,
            Format::Xml => OutputFormat::Xml,
            Format::Adoc => OutputFormat::Adoc,
        }
    }
}

/// Everything needed to convert one input, resolved from the config file and flags.
struct Job {
    format: OutputFormat,
    html: HtmlOptions,
    attributes: AttributeTable,
    output: Option<PathBuf>,
    output_dir: Option<PathBuf>,
}

fn parse_attribute(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        Some(_) => Err(format!("missing attribute name in '{arg}'")),
        // A bare name sets the attribute to empty, like `:name:` in a header
        None if !arg.trim().is_empty() => Ok((arg.trim().to_string(), String::new())),
        None => Err("attribute name must not be empty".to_string()),
    }
}

fn is_markdown(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("md" | "markdown")
    )
}

impl Job {
    fn from_cli(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => Config::load_from_path(path)?
                .with_context(|| format!("Config file '{}' does not exist", path.display()))?,
            None => Config::load()?.unwrap_or_default(),
        };

        let mut html = config.html_options()?;
        html.standalone |= cli.standalone || cli.xhtml;
        html.xhtml |= cli.xhtml;

        let mut attributes = AttributeTable::new();
        for (name, value) in &cli.attributes {
            attributes.set(name.clone(), value.clone());
        }

        let single = cli.inputs.len() == 1;
        Ok(Self {
            format: cli.format.map(OutputFormat::from).unwrap_or(config.output),
            html,
            attributes,
            output: cli.output.clone().filter(|_| single),
            output_dir: cli
                .output
                .clone()
                .filter(|_| !single)
                .or(config.output_dir),
        })
    }

    fn output_path(&self, input: &Path) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }
        let dir = self
            .output_dir
            .clone()
            .or_else(|| input.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        let stem = input.file_stem().unwrap_or(input.as_os_str()).to_string_lossy();
        dir.join(format!("{stem}.{}", self.format.extension()))
    }

    /// Converts one input to the target format and returns the output text.
    fn convert(&self, input: &Path) -> Result<String> {
        let text = fs::read_to_string(input)
            .with_context(|| format!("Failed to read '{}'", input.display()))?;

        let source = if is_markdown(input) {
            log::debug!("Transcoding Markdown input {}", input.display());
            convert_markdown_to_asciidoc(&text)
        } else {
            text
        };

        let output = match self.format {
            OutputFormat::Adoc if !is_markdown(input) => {
                bail!("'{}' is already AsciiDoc", input.display())
            }
            OutputFormat::Adoc => source,
            OutputFormat::Html | OutputFormat::Xml => {
                let root = Parser::with_attributes(self.attributes.clone()).parse(&source);
                if self.format == OutputFormat::Xml {
                    to_xml(&root)
                } else {
                    to_html(&root, &self.html)
                }
            }
        };
        Ok(output)
    }

    fn run_one(&self, input: &Path) -> Result<PathBuf> {
        let output = self.convert(input)?;
        let path = self.output_path(input);
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create '{}'", parent.display()))?;
        }
        fs::write(&path, output).with_context(|| format!("Failed to write '{}'", path.display()))?;
        Ok(path)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let job = match Job::from_cli(&cli) {
        Ok(job) => job,
        Err(e) => {
            log::error!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    let mut failed = 0;
    for input in &cli.inputs {
        match job.run_one(input) {
            Ok(path) => log::info!("{} -> {}", input.display(), path.display()),
            Err(e) => {
                log::error!("{e:#}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        log::error!("{failed} of {} inputs failed", cli.inputs.len());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn job(format: OutputFormat) -> Job {
        Job {
            format,
            html: HtmlOptions::default(),
            attributes: AttributeTable::new(),
            output: None,
            output_dir: None,
        }
    }

    #[test]
    fn test_parse_attribute() {
        assert_eq!(
            parse_attribute("version=1.2"),
            Ok(("version".to_string(), "1.2".to_string()))
        );
        assert_eq!(
            parse_attribute("flag"),
            Ok(("flag".to_string(), String::new()))
        );
        assert_eq!(
            parse_attribute("a=b=c"),
            Ok(("a".to_string(), "b=c".to_string()))
        );
        assert!(parse_attribute("=value").is_err());
        assert!(parse_attribute("").is_err());
    }

    #[test]
    fn test_cli_arguments() {
        let cli = Cli::try_parse_from([
            "adocx", "--format", "xml", "-a", "product=Widget", "-a", "v=2", "-o", "out.xml",
            "doc.adoc",
        ])
        .unwrap();

        assert_eq!(cli.format, Some(Format::Xml));
        assert_eq!(cli.attributes.len(), 2);
        assert_eq!(cli.output, Some(PathBuf::from("out.xml")));
        assert_eq!(cli.inputs, vec![PathBuf::from("doc.adoc")]);
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Cli::try_parse_from(["adocx"]).is_err());
    }

    #[test]
    fn test_output_path_next_to_input() {
        assert_eq!(
            job(OutputFormat::Html).output_path(Path::new("docs/guide.adoc")),
            PathBuf::from("docs/guide.html")
        );
        assert_eq!(
            job(OutputFormat::Adoc).output_path(Path::new("notes.md")),
            PathBuf::from("notes.adoc")
        );
    }

    #[test]
    fn test_output_path_in_output_dir() {
        let job = Job {
            output_dir: Some(PathBuf::from("/out")),
            ..job(OutputFormat::Xml)
        };
        assert_eq!(
            job.output_path(Path::new("docs/guide.adoc")),
            PathBuf::from("/out/guide.xml")
        );
    }

    #[test]
    fn test_seeded_attributes_reach_the_document() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("doc.adoc");
        fs::write(&input, "Product: {product}").unwrap();

        let mut job = job(OutputFormat::Html);
        job.attributes.set("product", "Widget");

        assert_eq!(job.convert(&input).unwrap(), "<p>Product: Widget</p>\n");
    }

    #[test]
    fn test_markdown_is_transcoded_first() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("notes.md");
        fs::write(&input, "# Notes\n\n- a\n- b").unwrap();

        assert_eq!(
            job(OutputFormat::Adoc).convert(&input).unwrap(),
            "= Notes\n\n* a\n* b\n"
        );
        let xml = job(OutputFormat::Xml).convert(&input).unwrap();
        assert!(xml.contains("title=\"Notes\""));
        assert!(xml.contains("<list style=\"unordered\">"));
    }

    #[test]
    fn test_adoc_output_rejects_asciidoc_input() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("doc.adoc");
        fs::write(&input, "text").unwrap();

        assert!(job(OutputFormat::Adoc).convert(&input).is_err());
    }

    #[test]
    fn test_run_one_writes_output_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("doc.adoc");
        fs::write(&input, "== Intro\n\nHello.").unwrap();
        let job = Job {
            output_dir: Some(temp_dir.path().join("site")),
            ..job(OutputFormat::Html)
        };

        let written = job.run_one(&input).unwrap();

        assert_eq!(written, temp_dir.path().join("site").join("doc.html"));
        assert!(fs::read_to_string(&written).unwrap().contains("<h2 id=\"intro\">Intro</h2>"));
    }

    #[test]
    fn test_missing_input_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.adoc");

        let err = job(OutputFormat::Html).run_one(&missing).unwrap_err();

        assert!(err.to_string().contains("missing.adoc"));
    }
}
