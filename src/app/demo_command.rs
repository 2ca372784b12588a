use super::{cli_manager, command::Command};
use anyhow::{anyhow, Context, Result};
use clap::{App, AppSettings, ArgMatches, SubCommand};
use dynaf::{
    dynamics::{DynamicAdmissibleSemanticsSolver, DynamicSolver, Extension, Patch},
    solvers::ExtensionEnumerator,
};
use log::info;
use std::io::Write;

const CMD_NAME: &str = "demo";

pub(crate) struct DemoCommand;

impl DemoCommand {
    pub(crate) fn new() -> Self {
        DemoCommand
    }
}

struct DemoStep {
    patches: Vec<Patch<String>>,
    expected: Vec<&'static str>,
}

fn demo_steps() -> Vec<DemoStep> {
    let s = |l: &str| l.to_string();
    vec![
        DemoStep {
            patches: vec![],
            expected: vec!["{}"],
        },
        DemoStep {
            patches: vec![
                Patch::EnableArgument(s("a")),
                Patch::EnableArgument(s("b")),
                Patch::EnableAttack(s("a"), s("b")),
            ],
            expected: vec!["{}", "{a}"],
        },
        DemoStep {
            patches: vec![Patch::EnableArgument(s("c"))],
            expected: vec!["{}", "{a}", "{c}", "{a,c}"],
        },
        DemoStep {
            patches: vec![Patch::EnableAttack(s("c"), s("a"))],
            expected: vec!["{}", "{c}", "{b,c}"],
        },
    ]
}

fn sorted_strings(extensions: &[Extension<String>]) -> Vec<String> {
    let mut sorted = extensions.iter().collect::<Vec<_>>();
    sorted.sort_by_cached_key(|e| (e.len(), e.to_string()));
    sorted.iter().map(|e| e.to_string()).collect()
}

impl<'a> Command<'a> for DemoCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Replays a fixed sequence of updates, displaying the expected and the computed extensions")
            .setting(AppSettings::DisableVersion)
            .arg(cli_manager::logging_level_cli_arg())
    }

    fn execute(&self, _arg_matches: &ArgMatches<'_>) -> Result<()> {
        run_demo(&mut std::io::stdout())
    }
}

fn run_demo(out: &mut dyn Write) -> Result<()> {
    let mut solver = DynamicAdmissibleSemanticsSolver::new();
    for (i, step) in demo_steps().iter().enumerate() {
        let context = || format!("while replaying demo step {}", i + 1);
        for p in step.patches.iter() {
            info!("applying update {}", p);
            solver.apply_patch(p).with_context(context)?;
        }
        let computed = sorted_strings(&solver.enumerate_extensions().with_context(context)?);
        let updates = step
            .patches
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>();
        let description = if updates.is_empty() {
            "empty framework".to_string()
        } else {
            updates.join(" ")
        };
        writeln!(out, "step {}: {}", i + 1, description).with_context(context)?;
        writeln!(out, "  expected: {}", step.expected.join(" ")).with_context(context)?;
        writeln!(out, "  computed: {}", computed.join(" ")).with_context(context)?;
        if computed != step.expected {
            return Err(anyhow!("computed extensions differ from the expected ones"))
                .with_context(context);
        }
    }
    out.flush().context("while writing the demo output")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_demo() {
        let mut buffer = Vec::new();
        run_demo(&mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        let lines = output.lines().collect::<Vec<_>>();
        assert_eq!(12, lines.len());
        assert_eq!("step 1: empty framework", lines[0]);
        assert_eq!("step 2: +arg(a) +arg(b) +att(a,b)", lines[3]);
        assert_eq!("  computed: {} {c} {b,c}", lines[11]);
    }
}
