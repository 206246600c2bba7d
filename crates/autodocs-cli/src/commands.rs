use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use autodocs_cli::pipeline::{
    GenerateRequest, TemplatePaths, ingest, inspect, run_convert, run_generate,
};
use autodocs_cli::settings::Settings;
use autodocs_cli::types::{ConvertResult, GenerateResult};
use autodocs_model::{FailurePolicy, HeightFormat};
use autodocs_render::{OfficeConverter, PdfConverter, Progress};
use autodocs_transform::{ContextBuilder, FixedClock, RecordPlan, SystemClock};
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::{ConvertArgs, GenerateArgs, InspectArgs};
use crate::summary::print_inspect_table;

pub fn run_generate_command(args: &GenerateArgs, settings: &Settings) -> Result<GenerateResult> {
    let request = generate_request(args, settings);
    let converter = args
        .pdf
        .then(|| office_converter(args.converter.as_ref(), settings));
    let converter = converter.as_ref().map(|c| c as &dyn PdfConverter);

    let bar = progress_bar();
    let on_progress = |progress: Progress<'_>| {
        bar.set_length(progress.total as u64);
        bar.set_position(progress.index as u64 + 1);
        bar.set_message(progress.name.to_string());
    };

    let result = match &args.date {
        Some(date) => {
            let clock = FixedClock::parse(date).context("parse --date")?;
            run_generate(&request, clock, converter, on_progress)
        }
        None => run_generate(&request, SystemClock, converter, on_progress),
    };
    bar.finish_and_clear();
    result
}

pub fn run_convert_command(args: &ConvertArgs, settings: &Settings) -> Result<ConvertResult> {
    let converter = office_converter(args.converter.as_ref(), settings);
    let archive = args.zip.then_some(settings.conversion.archive_name.as_str());
    run_convert(&args.dir, &converter, archive)
}

pub fn run_inspect_command(args: &InspectArgs, settings: &Settings) -> Result<()> {
    let plans = inspect_plans(args, settings)?;
    if args.json {
        let json = serde_json::to_string_pretty(&plans).context("serialize contexts")?;
        println!("{json}");
    } else {
        print_inspect_table(&plans);
    }
    Ok(())
}

fn inspect_plans(args: &InspectArgs, settings: &Settings) -> Result<Vec<RecordPlan>> {
    let dataset = ingest(&args.data)?;
    let height_format = args
        .height_format
        .map(HeightFormat::from)
        .unwrap_or(settings.generation.height_format);
    let plans = match &args.date {
        Some(date) => {
            let clock = FixedClock::parse(date).context("parse --date")?;
            inspect(&dataset, &ContextBuilder::new(clock).with_height_format(height_format))
        }
        None => inspect(
            &dataset,
            &ContextBuilder::new(SystemClock).with_height_format(height_format),
        ),
    };
    Ok(plans)
}

/// Merge flags over settings.
fn generate_request(args: &GenerateArgs, settings: &Settings) -> GenerateRequest {
    let mut options = settings.generation_options();
    if let Some(format) = args.height_format {
        options = options.with_height_format(format.into());
    }
    if args.continue_on_error {
        options = options.with_failure_policy(FailurePolicy::Continue);
    }
    if args.strict_placeholders {
        options = options.with_strict_placeholders(true);
    }

    GenerateRequest {
        data: args.data.clone(),
        templates: TemplatePaths {
            back_brace: args.back_template.clone(),
            knee_brace: args.knee_template.clone(),
        },
        output_dir: args
            .output_dir
            .clone()
            .unwrap_or_else(|| settings.output_dir()),
        options,
        clean: args.clean,
        archive_name: args
            .zip
            .then(|| settings.conversion.archive_name.clone()),
    }
}

fn office_converter(flag: Option<&PathBuf>, settings: &Settings) -> OfficeConverter {
    match flag.or(settings.conversion.binary.as_ref()) {
        Some(binary) => OfficeConverter::new(binary),
        None => OfficeConverter::default(),
    }
}

fn progress_bar() -> ProgressBar {
    if !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:32.cyan/blue}] {pos}/{len} {msg}",
    ) {
        bar.set_style(style.progress_chars("=> "));
    }
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}
