// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity selection lists.
//!
//! Source-table iteration is filtered through a selection expression: the
//! keyword `all`, an explicit id list (`"1 4 9"`) or an inclusive range
//! (`"3 to 12"`). This is the only selection mechanism the import exposes.

use std::fmt;
use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{multispace0, multispace1, u32 as id},
    combinator::{all_consuming, map},
    multi::separated_list1,
    sequence::{delimited, separated_pair, tuple},
    IResult,
};

use crate::error::Error;

/// Which entities of a table to process.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Every entry in the table.
    All,
    /// An explicit id list.
    Ids(Vec<u32>),
    /// An inclusive id range.
    Range {
        /// First id included.
        from: u32,
        /// Last id included.
        to: u32,
    },
}

impl Selection {
    /// True if the given id passes the filter.
    pub fn contains(&self, candidate: u32) -> bool {
        match self {
            Selection::All => true,
            Selection::Ids(ids) => ids.contains(&candidate),
            Selection::Range { from, to } => (*from..=*to).contains(&candidate),
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Selection::All
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => write!(f, "all"),
            Selection::Ids(ids) => {
                let mut first = true;
                for id in ids {
                    if !first {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", id)?;
                    first = false;
                }
                Ok(())
            }
            Selection::Range { from, to } => write!(f, "{} to {}", from, to),
        }
    }
}

/// Parse `all`
fn all(input: &str) -> IResult<&str, Selection> {
    map(tag_no_case("all"), |_| Selection::All)(input)
}

/// Parse `3 to 12`
fn range(input: &str) -> IResult<&str, Selection> {
    map(
        separated_pair(
            id,
            tuple((multispace1, tag_no_case("to"), multispace1)),
            id,
        ),
        |(from, to)| Selection::Range { from, to },
    )(input)
}

/// Parse `1 4 9`
fn id_list(input: &str) -> IResult<&str, Selection> {
    map(separated_list1(multispace1, id), Selection::Ids)(input)
}

impl FromStr for Selection {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.trim().is_empty() {
            return Ok(Selection::All);
        }
        // Try range before list: `3 to 12` starts like an id list.
        let result: IResult<&str, Selection> = all_consuming(delimited(
            multispace0,
            alt((all, range, id_list)),
            multispace0,
        ))(input);
        match result {
            Ok((_, selection)) => Ok(selection),
            Err(_) => Err(Error::MalformedSelection(input.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all() {
        assert_eq!("all".parse::<Selection>().unwrap(), Selection::All);
        assert_eq!("ALL".parse::<Selection>().unwrap(), Selection::All);
        assert_eq!("".parse::<Selection>().unwrap(), Selection::All);
        assert_eq!("  ".parse::<Selection>().unwrap(), Selection::All);
    }

    #[test]
    fn test_parse_id_list() {
        assert_eq!(
            "1 4 9".parse::<Selection>().unwrap(),
            Selection::Ids(vec![1, 4, 9])
        );
        assert_eq!("7".parse::<Selection>().unwrap(), Selection::Ids(vec![7]));
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(
            "3 to 12".parse::<Selection>().unwrap(),
            Selection::Range { from: 3, to: 12 }
        );
        assert_eq!(
            " 3 TO 12 ".parse::<Selection>().unwrap(),
            Selection::Range { from: 3, to: 12 }
        );
    }

    #[test]
    fn test_parse_malformed() {
        assert!("3 to".parse::<Selection>().is_err());
        assert!("beams".parse::<Selection>().is_err());
        assert!("1, 2, 3".parse::<Selection>().is_err());
    }

    #[test]
    fn test_contains() {
        assert!(Selection::All.contains(42));
        assert!(Selection::Ids(vec![2, 5]).contains(5));
        assert!(!Selection::Ids(vec![2, 5]).contains(3));
        assert!(Selection::Range { from: 3, to: 12 }.contains(3));
        assert!(Selection::Range { from: 3, to: 12 }.contains(12));
        assert!(!Selection::Range { from: 3, to: 12 }.contains(13));
    }

    #[test]
    fn test_display_round_trip() {
        for text in ["all", "1 4 9", "3 to 12"] {
            let selection: Selection = text.parse().unwrap();
            assert_eq!(selection.to_string(), text);
        }
    }
}
