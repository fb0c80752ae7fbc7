//! Chat widget embed snippet generation.

use clap::Args;
use serde::Serialize;

use crate::output::{self, OutputFormat};
use kbase_core::config::AppConfig;
use kbase_core::error::AppError;
use kbase_entity::widget::{WidgetConfig, WidgetPosition};
use kbase_service::{EmbedTarget, render_snippet};

/// Arguments for the embed command
#[derive(Debug, Args)]
pub struct EmbedArgs {
    /// Snippet flavor: html or react
    #[arg(short, long, default_value = "html")]
    pub target: EmbedTarget,
    /// Brand color override (#rrggbb)
    #[arg(long)]
    pub brand_color: Option<String>,
    /// Greeting override
    #[arg(long)]
    pub greeting: Option<String>,
    /// Tone override
    #[arg(long)]
    pub tone: Option<String>,
    /// Position override: bottom-right or bottom-left
    #[arg(long)]
    pub position: Option<WidgetPosition>,
}

#[derive(Debug, Serialize)]
struct EmbedOutput<'a> {
    target: EmbedTarget,
    widget: &'a WidgetConfig,
    snippet: String,
}

/// Execute the embed command
pub fn execute(args: &EmbedArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let mut widget = WidgetConfig::from_studio(&config.studio)?;
    if let Some(color) = &args.brand_color {
        widget.brand_color = color.clone();
    }
    if let Some(greeting) = &args.greeting {
        widget.greeting = greeting.clone();
    }
    if let Some(tone) = &args.tone {
        widget.tone = tone.clone();
    }
    if let Some(position) = args.position {
        widget.position = position;
    }

    let snippet = render_snippet(&widget, args.target)?;

    match format {
        OutputFormat::Table => println!("{}", snippet),
        OutputFormat::Json => output::print_json(&EmbedOutput {
            target: args.target,
            widget: &widget,
            snippet,
        }),
    }

    Ok(())
}
