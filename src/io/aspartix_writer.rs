use super::ResponseWriter;
use crate::{aa::LabelType, dynamics::Extension};
use anyhow::{Context, Result};
use std::io::Write;

/// A writer for the answers to problems, following the output format of the ICCMA competitions.
///
/// Extensions are written as `[a,b,c]`, counts as integers, and acceptance statuses as `YES` or `NO`.
///
/// # Example
///
/// ```
/// # use dynaf::dynamics::{DynamicAdmissibleSemanticsSolver, DynamicSolver};
/// # use dynaf::io::{AspartixWriter, ResponseWriter};
/// # use dynaf::solvers::SingleExtensionComputer;
/// let mut solver = DynamicAdmissibleSemanticsSolver::new();
/// solver.new_argument("a".to_string()).unwrap();
/// let extension = solver.compute_one_extension().unwrap().unwrap();
/// AspartixWriter::default().write_single_extension(&mut std::io::stdout(), &extension).unwrap();
/// ```
#[derive(Default)]
pub struct AspartixWriter;

impl<T> ResponseWriter<T> for AspartixWriter
where
    T: LabelType,
{
    fn write_no_extension(&self, writer: &mut dyn Write) -> Result<()> {
        super::specs::write_no_extension(writer)
    }

    fn write_single_extension(
        &self,
        writer: &mut dyn Write,
        extension: &Extension<T>,
    ) -> Result<()> {
        let context = "while writing an extension";
        write!(writer, "[").context(context)?;
        let mut first = true;
        extension.iter().try_for_each(|arg| {
            if first {
                first = false;
                write!(writer, "{}", arg).context(context)
            } else {
                write!(writer, ",{}", arg).context(context)
            }
        })?;
        writeln!(writer, "]").context(context)?;
        writer.flush().context(context)
    }

    fn write_extension_count(&self, writer: &mut dyn Write, count: usize) -> Result<()> {
        let context = "while writing an extension count";
        writeln!(writer, "{}", count).context(context)?;
        writer.flush().context(context)
    }

    fn write_acceptance_status(
        &self,
        writer: &mut dyn Write,
        acceptance_status: bool,
    ) -> Result<()> {
        super::specs::write_acceptance_status(writer, acceptance_status)
    }
}
