//! Inspect command implementation

use console::Style;

use crate::cli::InspectArgs;
use crate::config::RebuildConfig;
use crate::error::Result;
use crate::operations::{InspectOperation, InspectReport};
use crate::report::display;
use crate::script::ComponentOrigin;

pub fn run(config: &RebuildConfig, quiet: bool, args: InspectArgs) -> Result<()> {
    let report = InspectOperation::new(config).execute(&args.script)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !quiet {
        display_inspect(&report);
    }
    Ok(())
}

fn display_inspect(report: &InspectReport) {
    display::display_setup(&report.setup);

    println!();
    println!("{}", Style::new().bold().cyan().apply_to("Variants:"));
    if report.variants.is_empty() {
        println!("  {}", Style::new().dim().apply_to("(no variants declared)"));
    }
    for variant in &report.variants {
        let origin = match variant.origin {
            ComponentOrigin::Declared => "",
            ComponentOrigin::Check => " [check]",
        };
        println!(
            "  {}. {}{} -> {} ({} files)",
            variant.index,
            Style::new().bold().apply_to(&variant.name),
            origin,
            Style::new().green().apply_to(&variant.label),
            variant.files
        );
        if !variant.description.is_empty() {
            println!("     {}", Style::new().dim().apply_to(&variant.description));
        }
    }
    println!("  Common declarations: {}", report.common_declarations);

    if !report.issues.is_empty() {
        println!();
        println!(
            "{}",
            Style::new()
                .bold()
                .cyan()
                .apply_to(format!("Warnings ({}):", report.issues.len()))
        );
        for issue in &report.issues {
            println!("  {} {}", Style::new().yellow().apply_to("!"), issue);
        }
    }
}
