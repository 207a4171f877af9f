//! Container ID inspection command

use anyhow::Result;
use colored::Colorize;
use fleetkey_lib::{classify_container_id, short_id, ContainerIdForm};
use serde::Serialize;

use crate::output::{color_form, print_success, print_warning, OutputFormat};

#[derive(Debug, Serialize)]
struct IdReport<'a> {
    id: &'a str,
    form: ContainerIdForm,
    short_id: &'a str,
    runtime_id: bool,
}

/// Classify a container ID and show the short form used in keys
pub fn inspect_id(id: &str, format: OutputFormat) -> Result<()> {
    let form = classify_container_id(id);
    let report = IdReport {
        id,
        form,
        short_id: short_id(id),
        runtime_id: form.is_runtime_id(),
    };

    match format {
        OutputFormat::Json => crate::output::print_json(&report)?,
        OutputFormat::Table => {
            println!("ID:       {}", report.id);
            println!("Form:     {}", color_form(report.form));
            println!("Short ID: {}", report.short_id.cyan());
            if report.runtime_id {
                print_success("Looks like a container runtime ID");
            } else {
                print_warning("Not a 12 or 64 character hex ID; keys built from it may collide");
            }
        }
    }

    Ok(())
}
