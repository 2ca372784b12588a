use super::{cli_manager, command::Command, common};
use anyhow::{anyhow, Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use dynaf::{
    aa::{self, AAFramework, Query, Semantics},
    dynamics::{DynamicAdmissibleSemanticsSolver, DynamicSolver},
    io::{AspartixWriter, InstanceReader, ResponseWriter},
    solvers::{
        CredulousAcceptanceComputer, ExtensionEnumerator, SingleExtensionComputer, SolverConfig,
    },
};
use log::{info, warn};
use std::{
    fs::File,
    io::{BufRead, BufReader, Write},
    time::Duration,
};

const CMD_NAME: &str = "solve";

const ARG_PROBLEM: &str = "PROBLEM";
const ARG_ARG: &str = "ARG";
const ARG_UPDATES: &str = "UPDATES";
const ARG_TIMEOUT: &str = "TIMEOUT";

pub(crate) struct SolveCommand;

impl SolveCommand {
    pub(crate) fn new() -> Self {
        SolveCommand
    }
}

impl<'a> Command<'a> for SolveCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Solves a problem on an argumentation framework, then after each of its updates")
            .setting(AppSettings::DisableVersion)
            .arg(common::input_args())
            .arg(common::reader_arg())
            .arg(
                Arg::with_name(ARG_PROBLEM)
                    .short("p")
                    .empty_values(false)
                    .multiple(false)
                    .help("the problem to solve")
                    .required(true),
            )
            .arg(
                Arg::with_name(ARG_ARG)
                    .short("a")
                    .empty_values(false)
                    .multiple(false)
                    .help("the argument (for DC queries)")
                    .required(false),
            )
            .arg(
                Arg::with_name(ARG_UPDATES)
                    .short("u")
                    .long("updates")
                    .empty_values(false)
                    .multiple(false)
                    .help("a file containing one update per line (\"-\" for the standard input)")
                    .required(false),
            )
            .arg(
                Arg::with_name(ARG_TIMEOUT)
                    .long("timeout")
                    .empty_values(false)
                    .multiple(false)
                    .help("the maximal time in seconds allowed to each solving step")
                    .required(false),
            )
            .arg(cli_manager::logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let (query, semantics) =
            aa::read_problem_string(common::required_value(arg_matches, ARG_PROBLEM)?)?;
        let arg = arg_matches.value_of(ARG_ARG).map(|a| a.to_string());
        check_arg_definition(query, &arg)?;
        let reader = common::create_reader(arg_matches)?;
        let file = common::required_value(arg_matches, common::ARG_INPUT)?;
        let af = common::read_file_path(file, reader.as_ref())?;
        if let Some(a) = &arg {
            af.argument_set()
                .get_argument(a)
                .context("while parsing the argument passed to the command line")?;
        }
        let mut solver = match semantics {
            Semantics::AD => DynamicAdmissibleSemanticsSolver::new_with_config(
                create_solver_config(arg_matches)?,
            ),
        };
        load_framework(&mut solver, &af)?;
        let mut step = SolvingStep {
            solver,
            query,
            arg,
            writer: AspartixWriter::default(),
            out: std::io::stdout(),
        };
        step.answer()?;
        if let Some(updates) = arg_matches.value_of(ARG_UPDATES) {
            apply_updates(&mut step, reader.as_ref(), updates)?;
        }
        Ok(())
    }
}

fn check_arg_definition(query: Query, arg: &Option<String>) -> Result<()> {
    match (query.needs_argument(), arg.is_some()) {
        (true, false) => Err(anyhow!(
            "missing argument on the command line (required for query {})",
            query.as_ref()
        )),
        (false, true) => {
            warn!(
                "unexpected argument on the command line (useless for query {})",
                query.as_ref()
            );
            Ok(())
        }
        _ => Ok(()),
    }
}

fn create_solver_config(arg_matches: &ArgMatches<'_>) -> Result<SolverConfig> {
    let config = SolverConfig::default();
    match arg_matches.value_of(ARG_TIMEOUT) {
        Some(t) => {
            let seconds = t
                .parse::<u64>()
                .with_context(|| format!(r#"while parsing the timeout "{}""#, t))?;
            info!("each solving step is limited to {} second(s)", seconds);
            Ok(config.with_timeout(Duration::from_secs(seconds)))
        }
        None => Ok(config),
    }
}

fn load_framework<S>(solver: &mut S, af: &AAFramework<String>) -> Result<()>
where
    S: DynamicSolver<String>,
{
    let context = "while loading the argumentation framework into the solver";
    af.argument_set()
        .iter()
        .try_for_each(|a| solver.new_argument(a.label().clone()))
        .context(context)?;
    af.iter_attacks()
        .try_for_each(|att| solver.new_attack(att.attacker().label(), att.attacked().label()))
        .context(context)
}

fn apply_updates(
    step: &mut SolvingStep<impl Write>,
    reader: &dyn InstanceReader<String>,
    updates: &str,
) -> Result<()> {
    let input: Box<dyn BufRead> = if updates == "-" {
        info!("reading updates from the standard input");
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let path = common::canonicalize_file_path(updates)?;
        info!("reading update file {:?}", path);
        Box::new(BufReader::new(
            File::open(&path).with_context(|| format!("while opening file {:?}", path))?,
        ))
    };
    for (i, line) in input.lines().enumerate() {
        let context = || format!("while processing the update at line {}", i + 1);
        let l = line.with_context(context)?;
        if l.trim().is_empty() {
            continue;
        }
        let patches = reader.read_update_line(&l).with_context(context)?;
        for p in patches.iter() {
            info!("applying update {}", p);
            step.solver.apply_patch(p).with_context(context)?;
        }
        step.answer().with_context(context)?;
    }
    Ok(())
}

struct SolvingStep<W>
where
    W: Write,
{
    solver: DynamicAdmissibleSemanticsSolver<String>,
    query: Query,
    arg: Option<String>,
    writer: AspartixWriter,
    out: W,
}

impl<W> SolvingStep<W>
where
    W: Write,
{
    fn answer(&mut self) -> Result<()> {
        match self.query {
            Query::CE => {
                let count = self
                    .solver
                    .count_extensions()
                    .context("while counting the extensions")?;
                ResponseWriter::<String>::write_extension_count(&self.writer, &mut self.out, count)
            }
            Query::DC => {
                let arg = self
                    .arg
                    .as_ref()
                    .ok_or_else(|| anyhow!("no argument to check"))?;
                let status = self
                    .solver
                    .is_credulously_accepted(arg)
                    .with_context(|| format!(r#"while checking the acceptance of "{}""#, arg))?;
                ResponseWriter::<String>::write_acceptance_status(&self.writer, &mut self.out, status)
            }
            Query::EE => {
                let mut extensions = self
                    .solver
                    .enumerate_extensions()
                    .context("while enumerating the extensions")?;
                info!("found {} extension(s)", extensions.len());
                extensions.sort_by_cached_key(|e| (e.len(), e.to_string()));
                extensions
                    .iter()
                    .try_for_each(|e| self.writer.write_single_extension(&mut self.out, e))
            }
            Query::SE => match self
                .solver
                .compute_one_extension()
                .context("while computing an extension")?
            {
                Some(e) => self.writer.write_single_extension(&mut self.out, &e),
                None => ResponseWriter::<String>::write_no_extension(&self.writer, &mut self.out),
            },
        }
    }
}
