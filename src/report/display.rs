//! Console rendering of run reports

use console::Style;

use super::RunReport;
use crate::script::SetupInfo;

fn heading(text: &str) {
    println!();
    println!("{}", Style::new().bold().cyan().apply_to(text));
}

fn field(label: &str, value: Option<&String>) {
    println!(
        "  {} {}",
        Style::new().bold().apply_to(label),
        value.map_or("N/A", String::as_str)
    );
}

/// Print application metadata
pub fn display_setup(setup: &SetupInfo) {
    heading("Extraction Summary");
    field("App Name:", setup.app_name.as_ref());
    field("App Version:", setup.app_version.as_ref());
    field("App Publisher:", setup.app_publisher.as_ref());
    field("App Support URL:", setup.app_support_url.as_ref());
    field("App Comments:", setup.app_comments.as_ref());
}

/// Print the full summary of a rebuild
pub fn display_report(report: &RunReport) {
    display_setup(&report.setup);

    heading("Variants Processed:");
    if report.variants.is_empty() {
        println!("  {}", Style::new().dim().apply_to("(no variants declared)"));
    }
    for variant in &report.variants {
        let name = if variant.description.is_empty() {
            variant.name.clone()
        } else {
            format!("{} ({})", variant.name, variant.description)
        };
        let label_style = if variant.label.is_other() {
            Style::new().yellow()
        } else {
            Style::new().green()
        };
        println!(
            "  Variant {} {} -> {}",
            variant.index,
            name,
            label_style.apply_to(&variant.label)
        );
    }

    heading("Output Directories by Arch Created:");
    for tree in &report.trees {
        println!(
            "  {} {} ({} arch-specific, {} copied)",
            Style::new().green().apply_to(tree.path.display()),
            Style::new().dim().apply_to(format!("[{}]", tree.label)),
            tree.arch_files,
            tree.files_copied
        );
    }
    println!("  Common files: {}", report.common_files);
    if !report.multi_arch {
        println!(
            "  {}",
            Style::new()
                .yellow()
                .apply_to("No multi-architecture variants detected")
        );
    }

    heading("Output Directory with raw unpack:");
    println!(
        "  {}",
        Style::new().green().apply_to(report.raw_extraction.display())
    );

    display_issues(report);
}

fn display_issues(report: &RunReport) {
    if report.issues.is_empty() {
        println!();
        println!("{}", Style::new().bold().green().apply_to("Rebuild complete"));
        return;
    }

    heading(&format!("Warnings ({}):", report.issues.len()));
    for issue in &report.issues {
        println!("  {} {}", Style::new().yellow().apply_to("!"), issue);
    }

    println!();
    let failures = report.failures();
    if failures > 0 {
        println!(
            "{}",
            Style::new()
                .bold()
                .yellow()
                .apply_to(format!("Rebuild finished with failures: {failures}"))
        );
    } else {
        println!("{}", Style::new().bold().green().apply_to("Rebuild complete"));
    }
}
