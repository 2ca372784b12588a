//! Objects used to read Argumentation frameworks and their updates, and to write answers to problems.

mod aspartix_reader;
pub use aspartix_reader::AspartixReader;

mod aspartix_writer;
pub use aspartix_writer::AspartixWriter;

mod specs;
pub use specs::InstanceReader;
pub use specs::ResponseWriter;
pub use specs::WarningHandler;

mod tgf_reader;
pub use tgf_reader::TgfReader;

mod warning_result;
