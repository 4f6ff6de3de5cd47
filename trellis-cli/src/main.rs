//! Trellis CLI
//!
//! Renders a JSON page description to HTML 4.01, XHTML 1.1 or HTML5.
//!
//! - trellis page.json                      # compact HTML5
//! - trellis --version xhtml1 --indent -    # read stdin, indented XHTML

mod input;

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use trellis_html::{ConversionSettings, Customizer, HtmlVersion, ScriptsAtBodyEnd};

use input::PageDescription;

/// Trellis: build HTML documents from JSON page descriptions
#[derive(Parser, Debug)]
#[command(name = "trellis")]
#[command(author, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Compact HTML5
    trellis page.json

    # Indented XHTML 1.1
    trellis --version xhtml1 --indent page.json

    # Read the description from stdin
    cat page.json | trellis -
"#)]
struct Cli {
    /// Page description file, or `-` for stdin
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Markup dialect: html4, xhtml1 or html5
    #[arg(long, value_name = "VERSION")]
    version: Option<HtmlVersion>,

    /// Indent the markup
    #[arg(long)]
    indent: bool,

    /// Indent inline stylesheets
    #[arg(long)]
    css_indent: bool,

    /// Render out-of-band nodes where they were authored
    #[arg(long)]
    no_extract_out_of_band: bool,

    /// Move out-of-band nodes to the end of the body, head-targeted ones included
    #[arg(long)]
    scripts_at_body_end: bool,
}

impl Cli {
    /// Apply the flags on top of the settings embedded in the page.
    fn settings(&self, base: ConversionSettings) -> ConversionSettings {
        ConversionSettings::new(self.version.unwrap_or_else(|| base.version()))
            .with_html_indent(self.indent || base.indent_html())
            .with_css_indent(self.css_indent || base.indent_css())
            .with_out_of_band_extraction(!self.no_extract_out_of_band && base.extract_out_of_band())
    }

    /// Render the page described by `source` with the flags applied.
    fn render(&self, source: &str) -> Result<String> {
        let page = PageDescription::from_json(source)?;
        let settings = self.settings(page.settings.unwrap_or_default());
        let mut document = page.build()?;

        let customizer: Option<&dyn Customizer> = if self.scripts_at_body_end {
            Some(&ScriptsAtBodyEnd)
        } else {
            None
        };
        document
            .render(&settings, customizer)
            .context("failed to render document")
    }

    fn read_input(&self) -> Result<String> {
        if self.input.as_os_str() == "-" {
            io::read_to_string(io::stdin()).context("failed to read stdin")
        } else {
            fs::read_to_string(&self.input)
                .with_context(|| format!("failed to read {}", self.input.display()))
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let markup = cli.render(&cli.read_input()?)?;
    println!("{}", markup.trim_end());
    Ok(())
}
