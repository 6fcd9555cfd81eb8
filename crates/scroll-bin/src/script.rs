//! Scroll script: one character per simulated host notification.
//!
//! `l` last edge entered, `f` first edge entered, `b` both edges in one
//! batch, `e` keep scrolling forward until the end, `s` back to the start.
//! Whitespace is skipped.

use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Last,
    First,
    Both,
    ToEnd,
    ToStart,
}

impl Step {
    pub fn label(&self) -> &'static str {
        match self {
            Step::Last => "last",
            Step::First => "first",
            Step::Both => "both",
            Step::ToEnd => "end",
            Step::ToStart => "start",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("unknown step {step:?} at position {position} (expected one of l, f, b, e, s)")]
    UnknownStep { step: char, position: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Script(pub Vec<Step>);

impl FromStr for Script {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .filter(|(_, c)| !c.is_whitespace())
            .map(|(position, c)| match c.to_ascii_lowercase() {
                'l' => Ok(Step::Last),
                'f' => Ok(Step::First),
                'b' => Ok(Step::Both),
                'e' => Ok(Step::ToEnd),
                's' => Ok(Step::ToStart),
                step => Err(ScriptError::UnknownStep { step, position }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_steps_skipping_whitespace() {
        let script: Script = "l l F\tb e s".parse().unwrap();
        assert_eq!(
            script.0,
            vec![
                Step::Last,
                Step::Last,
                Step::First,
                Step::Both,
                Step::ToEnd,
                Step::ToStart
            ]
        );
    }

    #[test]
    fn reports_unknown_step_position() {
        let err = "llx".parse::<Script>().unwrap_err();
        assert_eq!(
            err,
            ScriptError::UnknownStep {
                step: 'x',
                position: 2
            }
        );
    }

    #[test]
    fn empty_script_is_valid() {
        assert_eq!("".parse::<Script>().unwrap(), Script::default());
    }
}
