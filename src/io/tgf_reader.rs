use super::{InstanceReader, WarningHandler};
use crate::{aa::AAFramework, dynamics::Patch};
use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::io::{BufRead, BufReader, Read};

lazy_static! {
    static ref ARG_LINE_PATTERN: Regex = Regex::new(r"^\s*([-_[:alnum:]]+)\s*$").unwrap();
    static ref ATT_LINE_PATTERN: Regex =
        Regex::new(r"^\s*([-_[:alnum:]]+)\s+([-_[:alnum:]]+)\s*$").unwrap();
    static ref UPDATE_LINE_PATTERN: Regex = Regex::new(r"^\s*([+-])(.*)$").unwrap();
}

/// A reader for the Trivial Graph Format (TGF).
///
/// The file begins with the arguments, one per line, followed by a line containing a single `#`,
/// followed by the attacks, one per line, given by the labels of the attacker and the attacked arguments.
///
/// ```text
/// 1
/// 2
/// 3
/// #
/// 1 2
/// 3 1
/// ```
///
/// # Update lines
///
/// Updates begin with `+` (enable) or `-` (disable), followed by one or more arguments (`x`) or attacks (`x y`) separated by colons.
///
/// ```text
/// +4:4 1:2 4
/// -1 2
/// -3
/// ```
#[derive(Default)]
pub struct TgfReader {
    warning_handlers: Vec<WarningHandler>,
}

impl TgfReader {
    fn warn(&self, line: usize, message: &str) {
        self.warning_handlers
            .iter()
            .for_each(|h| (h)(line, message.to_string()));
    }
}

impl InstanceReader<String> for TgfReader {
    fn read(&self, reader: &mut dyn Read) -> Result<AAFramework<String>> {
        let mut af = AAFramework::default();
        let mut reading_attacks = false;
        let br = BufReader::new(reader);
        for (i, line) in br.lines().enumerate() {
            let context = || format!("while reading line with index {}", i);
            let l = line.with_context(context)?;
            if l.trim().is_empty() {
                continue;
            }
            if l.trim() == "#" {
                if reading_attacks {
                    self.warn(1 + i, "ignoring a second separator line");
                }
                reading_attacks = true;
                continue;
            }
            if reading_attacks {
                let c = ATT_LINE_PATTERN
                    .captures(&l)
                    .ok_or_else(|| anyhow!(r#"syntax error in attack line "{}""#, l))
                    .with_context(context)?;
                af.new_attack(&c[1].to_string(), &c[2].to_string())
                    .with_context(context)?;
            } else {
                let c = ARG_LINE_PATTERN
                    .captures(&l)
                    .ok_or_else(|| anyhow!(r#"syntax error in argument line "{}""#, l))
                    .with_context(context)?;
                af.new_argument(c[1].to_string()).with_context(context)?;
            }
        }
        Ok(af)
    }

    fn read_update_line(&self, line: &str) -> Result<Vec<Patch<String>>> {
        let context = || format!(r#"while reading update line "{}""#, line.trim());
        let captures = UPDATE_LINE_PATTERN
            .captures(line)
            .ok_or_else(|| anyhow!("an update must begin with + or -"))
            .with_context(context)?;
        let enable = &captures[1] == "+";
        captures[2]
            .split(':')
            .map(|item| {
                if let Some(c) = ARG_LINE_PATTERN.captures(item) {
                    Ok(if enable {
                        Patch::EnableArgument(c[1].to_string())
                    } else {
                        Patch::DisableArgument(c[1].to_string())
                    })
                } else if let Some(c) = ATT_LINE_PATTERN.captures(item) {
                    let (from, to) = (c[1].to_string(), c[2].to_string());
                    Ok(if enable {
                        Patch::EnableAttack(from, to)
                    } else {
                        Patch::DisableAttack(from, to)
                    })
                } else {
                    Err(anyhow!(r#"invalid update item "{}""#, item.trim()))
                }
            })
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

    fn str_attacks(af: &AAFramework<String>) -> Vec<String> {
        af.iter_attacks()
            .map(|a| format!("({},{})", a.attacker(), a.attacked()))
            .collect()
    }

    #[test]
    fn test_read_ok() {
        let instance = "1\n2\n 3 \n#\n1 2\n3  1\n";
        let af = TgfReader::default().read(&mut instance.as_bytes()).unwrap();
        assert_eq!(
            vec!["1", "2", "3"],
            af.argument_set()
                .iter()
                .map(|a| a.label().as_str())
                .collect::<Vec<_>>()
        );
        assert_eq!(
            vec!["(1,2)".to_string(), "(3,1)".to_string()],
            str_attacks(&af)
        );
    }

    #[test]
    fn test_read_no_attacks() {
        let af = TgfReader::default()
            .read(&mut "a\nb\n".as_bytes())
            .unwrap();
        assert_eq!(2, af.n_arguments());
        assert_eq!(0, af.n_attacks());
    }

    #[test]
    fn test_read_hyphenated_labels() {
        let reader = TgfReader::default();
        let af = reader.read(&mut "a-1\nb\n#\na-1 b\n".as_bytes()).unwrap();
        assert_eq!(vec!["(a-1,b)".to_string()], str_attacks(&af));
        assert_eq!(
            vec![
                Patch::EnableArgument("a-2".to_string()),
                Patch::EnableAttack("a-2".to_string(), "b".to_string()),
            ],
            reader.read_update_line("+a-2:a-2 b").unwrap()
        );
        assert_eq!(
            vec![Patch::DisableArgument("a-1".to_string())],
            reader.read_update_line("-a-1").unwrap()
        );
    }

    #[test]
    fn test_read_errors() {
        for instance in ["a b\n#\n", "a\n#\na\n", "a\n#\na b\n", "a\na\n#\n", "a\n#\na a\na a\n"] {
            assert!(TgfReader::default()
                .read(&mut instance.as_bytes())
                .is_err());
        }
    }

    #[test]
    fn test_warn_second_separator() {
        let warnings = Rc::new(RefCell::new(vec![]));
        let warnings_clone = Rc::clone(&warnings);
        let mut reader = TgfReader::default();
        reader.add_warning_handler(Box::new(move |i, w| {
            warnings_clone.borrow_mut().push((i, w))
        }));
        reader.read(&mut "a\n#\na a\n#\n".as_bytes()).unwrap();
        assert_eq!(
            vec![(4, "ignoring a second separator line".to_string())],
            warnings.borrow().clone()
        );
    }

    fn s(label: &str) -> String {
        label.to_string()
    }

    #[test]
    fn test_read_update_lines() {
        let reader = TgfReader::default();
        assert_eq!(
            vec![Patch::EnableAttack(s("1"), s("3"))],
            reader.read_update_line("+1 3").unwrap()
        );
        assert_eq!(
            vec![Patch::DisableAttack(s("2"), s("1"))],
            reader.read_update_line("-2 1").unwrap()
        );
        assert_eq!(
            vec![
                Patch::EnableArgument(s("4")),
                Patch::EnableAttack(s("4"), s("1")),
                Patch::EnableAttack(s("2"), s("4")),
            ],
            reader.read_update_line("+4:4 1:2 4").unwrap()
        );
        assert_eq!(
            vec![Patch::DisableArgument(s("3"))],
            reader.read_update_line("-3").unwrap()
        );
        for line in ["4", "+", "+1 2 3", "+1:"] {
            assert!(reader.read_update_line(line).is_err());
        }
    }
}
