use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use autodocs_cli::types::{ConversionOutcome, ConvertResult, GenerateResult};
use autodocs_model::{Checkbox, TemplateKind};
use autodocs_transform::RecordPlan;

pub fn print_generate_summary(result: &GenerateResult) {
    let report = &result.report;
    println!("Data: {}", result.source.display());
    println!("Output: {}", result.output_dir.display());
    if result.cleaned > 0 {
        println!("Removed {} earlier file(s)", result.cleaned);
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Item"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    table.add_row(vec![Cell::new("Records"), Cell::new(report.records)]);
    table.add_row(vec![Cell::new("Matched"), Cell::new(report.matched())]);
    table.add_row(vec![
        Cell::new("Unmatched"),
        count_cell(report.unmatched, Color::Yellow),
    ]);
    for kind in TemplateKind::ALL {
        table.add_row(vec![
            Cell::new(format!("{kind} documents")),
            Cell::new(report.documents_of(kind)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Overwritten"),
        count_cell(report.overwritten, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Failures"),
        count_cell(report.failures.len(), Color::Red),
    ]);
    match &result.conversion {
        ConversionOutcome::NotRequested => {}
        ConversionOutcome::Skipped => {
            table.add_row(vec![Cell::new("PDFs"), dim_cell("skipped")]);
        }
        ConversionOutcome::Converted(conversion) => {
            table.add_row(vec![Cell::new("PDFs"), Cell::new(conversion.pdfs.len())]);
        }
        ConversionOutcome::Failed(_) => {
            table.add_row(vec![
                Cell::new("PDFs"),
                Cell::new("failed")
                    .fg(Color::Red)
                    .add_attribute(Attribute::Bold),
            ]);
        }
    }
    println!("{table}");

    if report.has_failures() {
        let mut failures = Table::new();
        failures.set_header(vec![
            header_cell("Row"),
            header_cell("Template"),
            header_cell("Error"),
        ]);
        apply_table_style(&mut failures);
        align_column(&mut failures, 0, CellAlignment::Right);
        for failure in &report.failures {
            failures.add_row(vec![
                Cell::new(failure.row()),
                Cell::new(failure.kind()),
                Cell::new(failure.to_string()).fg(Color::Red),
            ]);
        }
        println!("{failures}");
    }

    if let Some(archive) = &result.archive {
        println!("Archive: {}", archive.display());
    }
    if let ConversionOutcome::Failed(message) = &result.conversion {
        eprintln!("PDF conversion failed: {message}");
    }
    if report.documents.is_empty() {
        eprintln!("warning: no documents were generated");
    }
    println!(
        "Step: {} ({:.1}s)",
        result.workflow.step(),
        result.duration.as_secs_f64()
    );
}

pub fn print_convert_summary(result: &ConvertResult) {
    println!("Folder: {}", result.dir.display());
    println!("PDFs: {}", result.report.pdfs.len());
    if let Some(diagnostic) = &result.report.diagnostic {
        println!("Converter output: {diagnostic}");
    }
    if let Some(archive) = &result.archive {
        println!("Archive: {}", archive.display());
    }
}

pub fn print_inspect_table(plans: &[RecordPlan]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Name"),
        header_cell("Products"),
        header_cell("L"),
        header_cell("R"),
        header_cell("Back"),
        header_cell("Knee"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for index in 3..=6 {
        align_column(&mut table, index, CellAlignment::Center);
    }

    for plan in plans {
        let classification = &plan.classification;
        let products = if classification.products.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(&classification.products)
        };
        table.add_row(vec![
            Cell::new(plan.row),
            Cell::new(plan.display_name()),
            products,
            checkbox_cell(classification.left),
            checkbox_cell(classification.right),
            flag_cell(classification.back_brace),
            flag_cell(classification.knee_brace),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count).fg(color)
    }
}

fn checkbox_cell(checkbox: Checkbox) -> Cell {
    if checkbox.is_checked() {
        Cell::new(checkbox.glyph()).fg(Color::Green)
    } else {
        dim_cell(checkbox.glyph())
    }
}

fn flag_cell(value: bool) -> Cell {
    if value {
        Cell::new("yes")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
