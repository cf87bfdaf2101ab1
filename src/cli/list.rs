//! List command implementation.
//!
//! Prints the three pattern catalogs and the template registry.

use clap::Args;
use serde::Serialize;

use crate::error::{QrError, Result};
use crate::output::Printer;
use crate::template::TemplateRegistry;
use crate::types::{CornerDotPatternId, CornerPatternId, PatternId};

/// List module patterns, eye patterns and templates
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print JSON to stdout instead of status lines
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct Inventory {
    patterns: Vec<&'static str>,
    corners: Vec<&'static str>,
    corner_dots: Vec<&'static str>,
    templates: Vec<TemplateEntry>,
}

#[derive(Debug, Serialize)]
struct TemplateEntry {
    id: &'static str,
    name: &'static str,
    description: &'static str,
}

fn inventory() -> Inventory {
    Inventory {
        patterns: PatternId::ALL.iter().map(|p| p.name()).collect(),
        corners: CornerPatternId::ALL.iter().map(|p| p.name()).collect(),
        corner_dots: CornerDotPatternId::ALL.iter().map(|p| p.name()).collect(),
        templates: TemplateRegistry::all()
            .into_iter()
            .map(|t| TemplateEntry {
                id: t.id,
                name: t.name,
                description: t.description,
            })
            .collect(),
    }
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let inv = inventory();

    if args.json {
        let json = serde_json::to_string_pretty(&inv).map_err(|e| QrError::Parse {
            message: format!("Failed to serialize inventory: {}", e),
            help: None,
        })?;
        println!("{}", json);
        return Ok(());
    }

    printer.info("Patterns", &inv.patterns.join(", "));
    printer.info("Corners", &inv.corners.join(", "));
    printer.info("Corner dots", &inv.corner_dots.join(", "));
    for t in &inv.templates {
        printer.info(
            "Template",
            &format!("{} {}", printer.bold(t.id), printer.dim(&format!("- {}", t.description))),
        );
    }

    Ok(())
}
