//! CLI output formatting

use crate::core::construct::NodeId;
use crate::core::{Construct, Pipeline, RunsOn, Step};
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "!");

/// Format validation errors, one per line
pub fn format_errors(errors: &[String]) -> String {
    errors
        .iter()
        .map(|error| format!("  {} {}", style("-").dim(), style(error).red()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_runs_on(runs_on: &RunsOn) -> String {
    match runs_on {
        RunsOn::Label(label) => label.clone(),
        RunsOn::Labels(labels) => labels.join(", "),
    }
}

fn describe_step(step: &Step) -> String {
    match (&step.uses, &step.run) {
        (Some(uses), _) => format!("uses {}", uses),
        (None, Some(run)) => {
            let first = run.lines().next().unwrap_or_default();
            if run.lines().count() > 1 {
                format!("run `{} ...`", first)
            } else {
                format!("run `{}`", first)
            }
        }
        (None, None) => style("(empty)").yellow().to_string(),
    }
}

/// Render the construct tree as an indented outline
pub fn format_tree(pipeline: &Pipeline) -> String {
    let mut lines = vec![format!(
        "{} {}",
        style("workflow").dim(),
        style(pipeline.name()).bold()
    )];
    let tree = pipeline.tree();
    write_children(pipeline, tree.root(), 1, &mut lines);
    lines.join("\n")
}

fn write_children(pipeline: &Pipeline, node: NodeId, depth: usize, lines: &mut Vec<String>) {
    let tree = pipeline.tree();
    let indent = "  ".repeat(depth);

    for &child in tree.children(node) {
        let Ok(entry) = tree.node(child) else {
            continue;
        };
        let line = match entry.payload() {
            Construct::Job(job) => {
                let declared = pipeline
                    .jobs()
                    .into_iter()
                    .find(|id| id.node() == child)
                    .map(|id| pipeline.declared_id(id).to_string())
                    .unwrap_or_else(|| entry.id().to_string());
                let mut line = format!(
                    "{}{} {} [{}]",
                    indent,
                    style("job").dim(),
                    style(declared).cyan(),
                    format_runs_on(&job.runs_on)
                );
                if !job.needs.is_empty() {
                    line.push_str(&format!(" needs {}", job.needs.join(", ")));
                }
                line
            }
            Construct::Step(step) => format!(
                "{}{} {}: {}",
                indent,
                style("step").dim(),
                entry.id(),
                describe_step(step)
            ),
            Construct::Workflow(_) => format!("{}{}", indent, entry.id()),
        };
        lines.push(line);
        write_children(pipeline, child, depth + 1, lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Job, PipelineProps, PushTrigger, Triggers};

    #[test]
    fn test_format_tree() {
        console::set_colors_enabled(false);

        let mut pipeline = Pipeline::new(PipelineProps::new(
            "CI",
            Triggers::new().push(PushTrigger::branches(["main"])),
        ));
        let build = pipeline.add_job("build", Job::new("ubuntu-latest"));
        pipeline.add_step(build, "checkout", Step::uses("actions/checkout@v5")).unwrap();
        pipeline.add_step(build, "test", Step::run("npm ci\nnpm test")).unwrap();
        let deploy = pipeline.add_job("deploy", Job::new(vec!["self-hosted", "linux"]).needs("build"));
        pipeline.add_step(deploy, "ship", Step::run("./deploy.sh")).unwrap();

        let text = format_tree(&pipeline);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "workflow CI",
                "  job build [ubuntu-latest]",
                "    step checkout: uses actions/checkout@v5",
                "    step test: run `npm ci ...`",
                "  job deploy [self-hosted, linux] needs build",
                "    step ship: run `./deploy.sh`",
            ]
        );
    }

    #[test]
    fn test_format_errors() {
        console::set_colors_enabled(false);
        let text = format_errors(&["first".to_string(), "second".to_string()]);
        assert_eq!(text, "  - first\n  - second");
    }
}
