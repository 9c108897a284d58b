use crate::adapters::json::JsonModelReader;
use crate::adapters::slicing::PatternSlices;
use crate::app::config::CycleConfig;
use crate::app::dto::{CycleReportDto, CycleViolationDto, DependencyDto};
use crate::app::engine::CycleCheck;
use crate::app::report::describe_cycle;
use crate::domain::dependency::Dependency;
use crate::domain::ports::ModelSource;
use crate::domain::predicate::{self, DescribedPredicate};
use anyhow::{Context as _, Result};
use std::path::Path;

/// Slice options of the `cycles` command.
#[derive(Debug, Clone)]
pub struct SliceOptions {
    pub pattern: String,
    pub naming: Option<String>,
}

/// Check the slices of a class model for cycles and print the violations.
///
/// Returns `true` if the slices are free of cycles.
pub fn check_cycles(
    model_path: &Path,
    slices: &SliceOptions,
    config: CycleConfig,
    json: bool,
) -> Result<bool> {
    let classes = JsonModelReader::new(model_path).load()?;
    let mut assignment = PatternSlices::new(&slices.pattern)
        .with_context(|| format!("Invalid slice pattern: {}", slices.pattern))?;
    if let Some(naming) = &slices.naming {
        assignment = assignment.with_naming(naming.as_str());
    }

    let result = CycleCheck::new(config).run(&classes, assignment)?;
    let descriptions: Vec<_> = result
        .cycles
        .iter()
        .map(|cycle| describe_cycle(cycle, &config))
        .collect();

    if json {
        let report = CycleReportDto {
            cycles: descriptions
                .into_iter()
                .map(CycleViolationDto::from)
                .collect(),
            truncated: result.truncated,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(result.is_free_of_cycles());
    }

    if result.is_free_of_cycles() {
        println!("Slices matching '{}' are free of cycles", slices.pattern);
        return Ok(true);
    }

    println!(
        "Slices matching '{}' should be free of cycles, but {} cycle(s) were found{}:",
        slices.pattern,
        descriptions.len(),
        if result.truncated {
            " (limit reached)"
        } else {
            ""
        }
    );
    println!("{}", "=".repeat(80));
    for description in &descriptions {
        println!("{description}");
        println!();
    }
    Ok(false)
}

/// Print the dependencies of a class model, filtered by origin and target.
pub fn list_dependencies(
    model_path: &Path,
    origin: Option<&str>,
    target: Option<&str>,
    json: bool,
) -> Result<()> {
    let classes = JsonModelReader::new(model_path).load()?;
    let filter = dependency_filter(origin, target);

    let mut dependencies: Vec<Dependency> = classes
        .direct_dependencies()
        .context("Failed to derive dependencies")?
        .into_iter()
        .filter(|d| filter.test(d))
        .collect();
    dependencies.sort();

    if json {
        let dtos: Vec<DependencyDto> = dependencies.iter().map(DependencyDto::from).collect();
        println!("{}", serde_json::to_string_pretty(&dtos)?);
        return Ok(());
    }

    println!(
        "{} dependencies matching {}:",
        dependencies.len(),
        filter.description()
    );
    for dependency in &dependencies {
        println!("  {dependency}");
    }
    Ok(())
}

fn dependency_filter(origin: Option<&str>, target: Option<&str>) -> DescribedPredicate<Dependency> {
    match (origin, target) {
        (Some(origin), Some(target)) => predicate::dependency(origin, target),
        (Some(origin), None) => predicate::dependency_origin(origin),
        (None, Some(target)) => predicate::dependency_target(target),
        (None, None) => DescribedPredicate::always_true(),
    }
}
