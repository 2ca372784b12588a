use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgMatches};
use dynaf::{
    aa::AAFramework,
    io::{AspartixReader, InstanceReader, TgfReader},
};
use log::{info, warn};
use std::{
    fs::{self, File},
    io::{BufReader, Read},
    path::PathBuf,
};

pub(crate) const ARG_INPUT: &str = "INPUT";

pub(crate) fn input_args() -> Arg<'static, 'static> {
    Arg::with_name(ARG_INPUT)
        .short("f")
        .empty_values(false)
        .multiple(false)
        .help("the input file that contains the AF")
        .required(true)
}

pub(crate) const ARG_READER: &str = "READER";

pub(crate) fn reader_arg() -> Arg<'static, 'static> {
    Arg::with_name(ARG_READER)
        .short("r")
        .long("reader")
        .empty_values(false)
        .multiple(false)
        .possible_values(&["apx", "tgf"])
        .default_value("apx")
        .help("the input file format (APXM/TGFM for update lines)")
        .required(false)
}

/// Returns the value of an argument clap has been told to require.
pub(crate) fn required_value<'a>(arg_matches: &'a ArgMatches<'_>, name: &str) -> Result<&'a str> {
    arg_matches
        .value_of(name)
        .ok_or_else(|| anyhow!("missing value for {}", name))
}

/// Builds the instance reader selected on the command line.
pub(crate) fn create_reader(arg_matches: &ArgMatches<'_>) -> Result<Box<dyn InstanceReader<String>>> {
    let mut reader: Box<dyn InstanceReader<String>> =
        match required_value(arg_matches, ARG_READER)? {
            "apx" => Box::<AspartixReader>::default(),
            "tgf" => Box::<TgfReader>::default(),
            r => return Err(anyhow!(r#"unknown reader "{}""#, r)),
        };
    reader.add_warning_handler(Box::new(|line, msg| warn!("at line {}: {}", line, msg)));
    Ok(reader)
}

pub(crate) fn read_file_path(
    file_path: &str,
    reader: &dyn InstanceReader<String>,
) -> Result<AAFramework<String>> {
    let af = read_file_path_with(file_path, &|r| reader.read(r))?;
    info!(
        "the argumentation framework has {} argument(s) and {} attack(s)",
        af.n_arguments(),
        af.n_attacks(),
    );
    Ok(af)
}

pub(crate) fn read_file_path_with<F, R>(file_path: &str, reader: &F) -> Result<R>
where
    F: Fn(&mut dyn Read) -> Result<R>,
{
    let canonicalized = canonicalize_file_path(file_path)?;
    info!("reading input file {:?}", canonicalized);
    let mut file_reader = BufReader::new(
        File::open(&canonicalized)
            .with_context(|| format!("while opening file {:?}", canonicalized))?,
    );
    (reader)(&mut file_reader)
}

/// Canonicalize a path given by the user.
pub(crate) fn canonicalize_file_path(file_path: &str) -> Result<PathBuf> {
    fs::canonicalize(PathBuf::from(file_path))
        .with_context(|| format!(r#"while opening file "{}""#, file_path))
}
