use clap::Args;
use serde_json::json;
use std::path::PathBuf;

use crate::cli::utils::{output_error, output_success, read_object_text};
use crate::cli::OutputFormat;
use crate::rpsl::{ObjectParser, ParseError, RpslParser};

#[derive(Args)]
pub struct ParseArgs {
    #[arg(long, help = "File with the object text (reads stdin when omitted)")]
    pub file: Option<PathBuf>,

    #[arg(long, help = "Source to assume when the object has none")]
    pub default_source: Option<String>,

    #[arg(long, help = "Apply strict validation (all mandatory attributes, no unknown attributes)")]
    pub strict: bool,
}

pub fn handle(args: ParseArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let text = read_object_text(args.file.as_deref())?;

    let obj = match RpslParser.parse(text.trim(), args.strict, args.default_source.as_deref()) {
        Ok(obj) => obj,
        Err(err @ ParseError::UnknownObjectClass(_)) => {
            // Text mode leaves the message to main's error output
            if matches!(output_format, OutputFormat::Json) {
                output_error(&output_format, &err.to_string(), Some("UNKNOWN_OBJECT_CLASS"))?;
            }
            return Err(err.into());
        }
    };

    match output_format {
        OutputFormat::Json => output_success(
            &output_format,
            &format!("Parsed {} {}", obj.object_class(), obj.pk()),
            Some(json!({
                "object_class": obj.object_class(),
                "pk": obj.pk(),
                "source": obj.source(),
                "attributes": obj.parsed_data(),
                "messages": obj.messages,
            })),
        ),
        OutputFormat::Text => {
            println!("Class:       {}", obj.object_class());
            println!("Primary key: {}", obj.pk());
            println!("Source:      {}", obj.source().unwrap_or("-"));
            for (name, value) in obj.attributes() {
                println!("  {:<14} {}", format!("{}:", name), value);
            }
            if !obj.messages.is_empty() {
                println!("Messages:");
                for message in obj.messages.iter() {
                    println!("  {:?}: {}", message.level, message.text);
                }
            }
            Ok(())
        }
    }
}
