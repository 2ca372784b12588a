use super::{warning_result::WarningResult, InstanceReader, WarningHandler};
use crate::{
    aa::{AAFramework, ArgumentSet},
    dynamics::Patch,
};
use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::io::{BufRead, BufReader, Read};

const ARG_AND_SPACE_PATTERN: &str = r"\s*[_[:alpha:]][_[:alpha:]\d]*\s*";

const UPDATE_ARG_PATTERN: &str = r"\s*[_[:alnum:]]+\s*";

lazy_static! {
    static ref ARG_LINE_PATTERN: Regex = Regex::new(r"^\s*arg\([^)]+\).\s*$").unwrap();
    static ref ARG_LINE_ARG_NAME_PATTERN: Regex =
        Regex::new(&format!(r"^\s*arg\(({})\).\s*$", ARG_AND_SPACE_PATTERN)).unwrap();
    static ref ATT_LINE_PATTERN: Regex = Regex::new(r"^\s*att\([^,]+,[^)]+\).\s*$").unwrap();
    static ref ATT_LINE_ARG_NAMES_PATTERN: Regex = Regex::new(&format!(
        r"^\s*att\(({}),({})\).\s*$",
        ARG_AND_SPACE_PATTERN, ARG_AND_SPACE_PATTERN,
    ))
    .unwrap();
    static ref UPDATE_LINE_PATTERN: Regex = Regex::new(r"^\s*([+-])(.*)\.\s*$").unwrap();
    static ref UPDATE_ARG_PATTERN_REGEX: Regex =
        Regex::new(&format!(r"^\s*arg\(({})\)\s*$", UPDATE_ARG_PATTERN)).unwrap();
    static ref UPDATE_ATT_PATTERN_REGEX: Regex = Regex::new(&format!(
        r"^\s*att\(({}),({})\)\s*$",
        UPDATE_ARG_PATTERN, UPDATE_ARG_PATTERN
    ))
    .unwrap();
}

const DEFAULT_ARG_LABELS_CAP: usize = 1 << 10;

fn captured_arg(c: &Captures, i: usize) -> WarningResult<String, String> {
    let str_arg = c.get(i).map(|m| m.as_str()).unwrap_or_default();
    let trimmed_str_arg = str_arg.trim().to_string();
    if trimmed_str_arg.len() == str_arg.len() {
        WarningResult::Ok(trimmed_str_arg)
    } else {
        WarningResult::Warned(
            trimmed_str_arg,
            vec!["argument names beginning or ending by spaces may be ambiguous".to_string()],
        )
    }
}

fn try_read_arg_line<T>(l: T) -> Result<Option<WarningResult<String, String>>>
where
    T: AsRef<str>,
{
    if ARG_LINE_PATTERN.is_match(l.as_ref()) {
        let captures = ARG_LINE_ARG_NAME_PATTERN.captures(l.as_ref());
        match captures {
            Some(c) => Ok(Some(captured_arg(&c, 1))),
            None => Err(anyhow!("invalid argument name in {}", l.as_ref().trim())),
        }
    } else {
        Ok(None)
    }
}

fn try_read_att_line<T>(l: T) -> Result<Option<WarningResult<(String, String), String>>>
where
    T: AsRef<str>,
{
    if ATT_LINE_PATTERN.is_match(l.as_ref()) {
        let captures = ATT_LINE_ARG_NAMES_PATTERN.captures(l.as_ref());
        match captures {
            Some(c) => Ok(Some(captured_arg(&c, 1).zip(captured_arg(&c, 2)))),
            None => Err(anyhow!("invalid argument names in {}", l.as_ref().trim())),
        }
    } else {
        Ok(None)
    }
}

fn read_update_item(item: &str, enable: bool) -> Result<Patch<String>> {
    let label = |c: &Captures, i: usize| c.get(i).map(|m| m.as_str().trim().to_string());
    if let Some(c) = UPDATE_ARG_PATTERN_REGEX.captures(item) {
        if let Some(a) = label(&c, 1) {
            return Ok(if enable {
                Patch::EnableArgument(a)
            } else {
                Patch::DisableArgument(a)
            });
        }
    }
    if let Some(c) = UPDATE_ATT_PATTERN_REGEX.captures(item) {
        if let (Some(from), Some(to)) = (label(&c, 1), label(&c, 2)) {
            return Ok(if enable {
                Patch::EnableAttack(from, to)
            } else {
                Patch::DisableAttack(from, to)
            });
        }
    }
    Err(anyhow!(r#"invalid update item "{}""#, item.trim()))
}

/// A reader for the Aspartix format.
///
/// This object is used to read an [`AAFramework`] encoded using the Aspartix input format, as defined on [the Aspartix website](https://www.dbai.tuwien.ac.at/research/argumentation/aspartix/dung.html).
/// The [LabelType](crate::aa::LabelType) of the returned argument frameworks is [String].
///
/// # Aspartix format
///
/// The following content defines an Argumentation Framework with three arguments labelled `a`, `b` and `c` and three attacks (`a` and `b` attack each other and `c` attacks `b`).
///
/// ```text
/// arg(a).
/// arg(b).
/// arg(c).
/// att(a,b).
/// att(b,a).
/// att(c,b).
/// ```
///
/// # Update lines
///
/// Updates begin with `+` (enable) or `-` (disable), followed by one or more `arg(x)` or `att(x,y)` items separated by colons,
/// and end with a period.
///
/// ```text
/// +arg(d):att(d,a):att(b,d).
/// -att(a,b).
/// -arg(c).
/// ```
#[derive(Default)]
pub struct AspartixReader {
    warning_handlers: Vec<WarningHandler>,
}

impl InstanceReader<String> for AspartixReader {
    fn read(&self, reader: &mut dyn Read) -> Result<AAFramework<String>> {
        let mut arg_labels = Vec::with_capacity(DEFAULT_ARG_LABELS_CAP);
        let mut af = None;
        let br = BufReader::new(reader);
        for (i, line) in br.lines().enumerate() {
            let context = || format!("while reading line with index {}", i);
            let warning_consumer = |warnings: Vec<String>| {
                for w in warnings.iter() {
                    self.warning_handlers
                        .iter()
                        .for_each(|h| (h)(1 + i, w.to_string()));
                }
            };
            let l = &line.with_context(context)?;
            if l.trim().is_empty() {
                continue;
            }
            if let Some(a) = try_read_arg_line(l).with_context(context)? {
                if af.is_some() {
                    return Err(anyhow!("found an argument declaration after an attack"))
                        .with_context(context);
                }
                arg_labels.push(a.consume_warnings(warning_consumer));
                continue;
            }
            if let Some(result) = try_read_att_line(l).with_context(context)? {
                let (a, b) = result.consume_warnings(warning_consumer);
                if af.is_none() {
                    af = Some(AAFramework::new_with_argument_set(
                        ArgumentSet::new_with_labels(&arg_labels).with_context(context)?,
                    ));
                }
                if let Some(framework) = af.as_mut() {
                    framework.new_attack(&a, &b).with_context(context)?;
                }
                continue;
            }
            return Err(anyhow!("syntax error in line \"{}\"", l)).with_context(context);
        }
        match af {
            Some(a) => Ok(a),
            None => Ok(AAFramework::new_with_argument_set(
                ArgumentSet::new_with_labels(&arg_labels)?,
            )),
        }
    }

    fn read_update_line(&self, line: &str) -> Result<Vec<Patch<String>>> {
        let context = || format!(r#"while reading update line "{}""#, line.trim());
        let captures = UPDATE_LINE_PATTERN
            .captures(line)
            .ok_or_else(|| anyhow!("an update must begin with + or - and end with a period"))
            .with_context(context)?;
        let enable = captures.get(1).map(|m| m.as_str()) == Some("+");
        captures
            .get(2)
            .map(|m| m.as_str())
            .unwrap_or_default()
            .split(':')
            .map(|item| read_update_item(item, enable))
            .collect::<Result<Vec<_>>>()
            .with_context(context)
    }

    fn add_warning_handler(&mut self, h: WarningHandler) {
        self.warning_handlers.push(h);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn test_arg_line_pattern_ok() {
        assert!(ARG_LINE_PATTERN.is_match("arg(a)."));
        assert!(ARG_LINE_PATTERN.is_match("    arg(a).   "));
        assert!(ARG_LINE_PATTERN.is_match("arg(1a. )."));
    }

    const WRONG_ARG_LINES: [&str; 6] = [
        "rg(a).",
        "arg(a)",
        "arg().",
        "arga).",
        "arg(a.",
        "arg(a).arg(b).",
    ];

    #[test]
    fn test_arg_line_pattern_not_ok() {
        WRONG_ARG_LINES
            .iter()
            .for_each(|p| assert!(!ARG_LINE_PATTERN.is_match(p)))
    }

    #[test]
    fn test_try_read_arg_line_ok() {
        let assert_arg_name = |expected: &str, actual| {
            let result = try_read_arg_line(actual);
            assert_eq!(
                expected.to_string(),
                result.unwrap().unwrap().consume_warnings(|_| {})
            );
        };
        assert_arg_name("a", "arg(a).");
        assert_arg_name("a", "arg( a ).");
        assert_arg_name("a", "    arg(a).   ");
        assert_arg_name("_a", "arg(_a).");
        assert_arg_name("a1_", "arg(a1_).");
    }

    #[test]
    fn test_try_read_arg_line_wrong_name() {
        ["arg(a.).", "arg(1a)."].iter().for_each(|l| {
            assert!(try_read_arg_line(l).is_err());
        });
    }

    #[test]
    fn test_try_read_att_line_ok() {
        let assert_att_names = |expected0: &str, expected1: &str, actual| {
            let result = try_read_att_line(actual);
            assert_eq!(
                (expected0.to_string(), expected1.to_string()),
                result.unwrap().unwrap().consume_warnings(|_| {})
            );
        };
        assert_att_names("a", "b", "att(a,b).");
        assert_att_names("a", "b", "att( a ,b).");
        assert_att_names("a", "b", "att(a, b ).");
        assert_att_names("a1_", "b", "att(a1_,b).");
    }

    #[test]
    fn test_try_read_att_line_wrong_name() {
        ["att(a.,b).", "att(1a,b).", "att(a,1b)."]
            .iter()
            .for_each(|l| {
                assert!(try_read_att_line(l).is_err());
            });
    }

    fn str_args(af: &AAFramework<String>) -> Vec<String> {
        af.argument_set().iter().map(|s| format!("{}", s)).collect()
    }

    fn str_attacks(af: &AAFramework<String>) -> Vec<String> {
        af.iter_attacks()
            .map(|a| format!("({},{})", a.attacker(), a.attacked()))
            .collect()
    }

    #[test]
    fn test_read_ok() {
        let instance = "arg(a).\narg(b).\natt(a,b).\n";
        let af = AspartixReader::default()
            .read(&mut instance.as_bytes())
            .unwrap();
        assert_eq!(vec!["a".to_string(), "b".to_string()], str_args(&af));
        assert_eq!(vec!["(a,b)".to_string()], str_attacks(&af));
    }

    #[test]
    fn test_read_empty() {
        let af = AspartixReader::default()
            .read(&mut "\n".as_bytes())
            .unwrap();
        assert_eq!(0, af.n_arguments());
        assert_eq!(0, af.n_attacks());
    }

    #[test]
    fn test_read_errors() {
        for instance in [
            "arg(a).\narg(b).\natt(a,b).\narg(c).\n",
            "argument(a).\narg(b).\natt(a,b).\n",
            "arg(a).\narg(b).\natt(a,c).\n",
            "arg(a).\narg(a).\n",
            "arg(a).\narg(b).\natt(a,b).\natt(a,b).\n",
        ] {
            assert!(AspartixReader::default()
                .read(&mut instance.as_bytes())
                .is_err());
        }
    }

    #[test]
    fn test_read_warn_arg_left_space() {
        let instance = "arg( a).\narg(b).\natt(a,b).\n";
        let warnings = Rc::new(RefCell::new(vec![]));
        let warnings_clone = Rc::clone(&warnings);
        let closure = Box::new(move |i, w| warnings_clone.borrow_mut().push((i, w)));
        let mut reader = AspartixReader::default();
        reader.add_warning_handler(closure);
        reader.read(&mut instance.as_bytes()).unwrap();
        assert_eq!(
            warnings.borrow().clone(),
            vec![(
                1,
                "argument names beginning or ending by spaces may be ambiguous".to_string()
            )]
        );
    }

    fn s(label: &str) -> String {
        label.to_string()
    }

    #[test]
    fn test_read_update_lines() {
        let reader = AspartixReader::default();
        assert_eq!(
            vec![Patch::EnableAttack(s("a1"), s("a3"))],
            reader.read_update_line("+att(a1,a3).").unwrap()
        );
        assert_eq!(
            vec![Patch::DisableAttack(s("a2"), s("a1"))],
            reader.read_update_line("-att(a2, a1).").unwrap()
        );
        assert_eq!(
            vec![
                Patch::EnableArgument(s("a4")),
                Patch::EnableAttack(s("a4"), s("a1")),
                Patch::EnableAttack(s("a2"), s("a4")),
            ],
            reader
                .read_update_line("+arg(a4):att(a4, a1):att(a2,a4).")
                .unwrap()
        );
        assert_eq!(
            vec![Patch::DisableArgument(s("a3"))],
            reader.read_update_line("-arg(a3).").unwrap()
        );
    }

    #[test]
    fn test_read_wrong_update_lines() {
        let reader = AspartixReader::default();
        for line in ["arg(a).", "+arg(a)", "+arg(a):.", "*arg(a).", "+foo(a)."] {
            assert!(reader.read_update_line(line).is_err());
        }
    }
}
