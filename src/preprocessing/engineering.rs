//! Feature engineering steps: deck, port side, family size and titles.

use crate::error::Error;
use crate::frame::{Frame, Value};
use crate::pipeline::Operation;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Cabin token pattern: letter prefix plus optional room number,
/// e.g. `C85`, `F`, `B57 B59 B63 B66` token-by-token.
static CABIN_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]+)(\d+)?").expect("valid cabin token pattern"));

fn cabin_str<'a>(value: &'a Value, row: usize) -> Result<&'a str, Error> {
    value.as_str().ok_or_else(|| {
        Error::Parse(format!("row {}: cabin cell is not a string", row))
    })
}

/// Derive the deck letter from the cabin field.
///
/// A cabin cell can list multiple cabins (`"C27 C29"`). The distinct letter
/// prefixes are collected and the reverse-sorted first one wins, placing a
/// multi-deck booking on the lowest deck. The top deck `T` sorts above `G`
/// lexicographically, so a booking spanning `T` and anything else resolves
/// to `T`; the odds of such a booking are slim, so the approximation stands.
pub struct EngineerDeck;

impl Operation for EngineerDeck {
    fn name(&self) -> &str {
        "engineer_deck"
    }

    fn apply(&self, frame: Frame) -> Result<Frame, Error> {
        let mut decks = Vec::with_capacity(frame.n_rows());
        for (row, cell) in frame.column("Cabin")?.iter().enumerate() {
            let cabins = cabin_str(cell, row)?;
            let mut seen: Vec<&str> = Vec::new();
            for token in cabins.split_whitespace() {
                let caps = CABIN_TOKEN.captures(token).ok_or_else(|| {
                    Error::Parse(format!("row {}: unparseable cabin token `{}`", row, token))
                })?;
                let deck = caps.get(1).map_or("", |m| m.as_str());
                if !seen.contains(&deck) {
                    seen.push(deck);
                }
            }
            if seen.is_empty() {
                return Err(Error::Parse(format!("row {}: empty cabin field", row)));
            }
            seen.sort_by(|a, b| b.cmp(a));
            decks.push(Value::from(seen[0]));
        }
        frame.with_column("Deck", decks)
    }
}

/// Derive the ship side (`P`ort / `S`tarboard) from cabin room numbers.
///
/// Even room numbers sit starboard, odd ones port. Rows whose cabins carry
/// no room number, or carry rooms on both sides, are marked `U`nknown.
pub struct EngineerPort;

impl Operation for EngineerPort {
    fn name(&self) -> &str {
        "engineer_port"
    }

    fn apply(&self, frame: Frame) -> Result<Frame, Error> {
        let mut sides = Vec::with_capacity(frame.n_rows());
        for (row, cell) in frame.column("Cabin")?.iter().enumerate() {
            let cabins = cabin_str(cell, row)?;
            let mut seen: Vec<&str> = Vec::new();
            for token in cabins.split_whitespace() {
                let caps = CABIN_TOKEN.captures(token).ok_or_else(|| {
                    Error::Parse(format!("row {}: unparseable cabin token `{}`", row, token))
                })?;
                if let Some(room) = caps.get(2) {
                    let number: u64 = room.as_str().parse().map_err(|_| {
                        Error::Parse(format!("row {}: bad room number `{}`", row, room.as_str()))
                    })?;
                    let side = if number % 2 == 0 { "S" } else { "P" };
                    if !seen.contains(&side) {
                        seen.push(side);
                    }
                }
            }
            let side = if seen.len() == 1 { seen[0] } else { "U" };
            sides.push(Value::from(side));
        }
        frame.with_column("Port", sides)
    }
}

/// Family size: siblings/spouses + parents/children + the passenger.
pub struct EngineerFamilySize;

impl Operation for EngineerFamilySize {
    fn name(&self) -> &str {
        "engineer_family_size"
    }

    fn apply(&self, frame: Frame) -> Result<Frame, Error> {
        let sibsp = frame.numeric("SibSp")?;
        let parch = frame.numeric("Parch")?;
        let sizes = sibsp
            .iter()
            .zip(&parch)
            .map(|(s, p)| Value::Num(s + p + 1.0))
            .collect();
        frame.with_column("FamilySize", sizes)
    }
}

/// Extract the honorific between the first comma and the following period
/// of the name field: `"Braund, Mr. Owen Harris"` yields `Mr`.
pub struct EngineerTitle;

impl Operation for EngineerTitle {
    fn name(&self) -> &str {
        "engineer_title"
    }

    fn apply(&self, frame: Frame) -> Result<Frame, Error> {
        let mut titles = Vec::with_capacity(frame.n_rows());
        for (row, cell) in frame.column("Name")?.iter().enumerate() {
            let name = cell.as_str().ok_or_else(|| {
                Error::Parse(format!("row {}: name cell is not a string", row))
            })?;
            let after_comma = name
                .split_once(',')
                .ok_or_else(|| Error::Parse(format!("row {}: name `{}` has no comma", row, name)))?
                .1;
            let title = after_comma
                .split_once('.')
                .ok_or_else(|| {
                    Error::Parse(format!("row {}: name `{}` has no title period", row, name))
                })?
                .0
                .trim();
            titles.push(Value::from(title));
        }
        frame.with_column("Title", titles)
    }
}

/// Collapse titles occurring fewer than `min_count` times into `"Rare"`.
///
/// Counts are taken over the incoming frame; a title seen exactly
/// `min_count` times is preserved.
pub struct CleanUncommonTitles {
    min_count: usize,
}

impl CleanUncommonTitles {
    pub fn new(min_count: usize) -> Self {
        Self { min_count }
    }
}

impl Default for CleanUncommonTitles {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Operation for CleanUncommonTitles {
    fn name(&self) -> &str {
        "clean_uncommon_titles"
    }

    fn apply(&self, frame: Frame) -> Result<Frame, Error> {
        let column = frame.column("Title")?;
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for cell in column {
            if let Some(title) = cell.as_str() {
                *counts.entry(title).or_insert(0) += 1;
            }
        }
        let cleaned = column
            .iter()
            .map(|cell| match cell.as_str() {
                Some(title) if counts[title] < self.min_count => Value::from("Rare"),
                _ => cell.clone(),
            })
            .collect();
        frame.with_column("Title", cleaned)
    }
}

/// Age cell as a number; a missing or non-numeric age matches no condition.
fn age_of(cell: &Value) -> Option<f64> {
    cell.as_num()
}

fn recode_titles<F>(frame: Frame, mut recode: F) -> Result<Frame, Error>
where
    F: FnMut(&str, Option<f64>) -> Option<Value>,
{
    let titles = frame.column("Title")?;
    let ages = frame.column("Age")?;
    let recoded = titles
        .iter()
        .zip(ages)
        .map(|(title, age)| match title.as_str() {
            Some(t) => recode(t, age_of(age)).unwrap_or_else(|| title.clone()),
            None => title.clone(),
        })
        .collect();
    frame.with_column("Title", recoded)
}

/// Masters under 18 are only called such because they are young; their title
/// is removed. Masters above 18 hold some kind of rank.
pub struct CleanMasterTitle;

impl Operation for CleanMasterTitle {
    fn name(&self) -> &str {
        "clean_master_title"
    }

    fn apply(&self, frame: Frame) -> Result<Frame, Error> {
        recode_titles(frame, |title, age| match (title, age) {
            ("Master", Some(a)) if a < 18.0 => Some(Value::Missing),
            ("Master", Some(a)) if a > 18.0 => Some(Value::from("Rank")),
            _ => None,
        })
    }
}

/// Misses under 18 lose the title; misses of 18 and older are unmarried.
pub struct CleanMissTitle;

impl Operation for CleanMissTitle {
    fn name(&self) -> &str {
        "clean_miss_title"
    }

    fn apply(&self, frame: Frame) -> Result<Frame, Error> {
        recode_titles(frame, |title, age| match (title, age) {
            ("Miss", Some(a)) if a < 18.0 => Some(Value::Missing),
            ("Miss", Some(a)) if a >= 18.0 => Some(Value::from("Single")),
            _ => None,
        })
    }
}

/// Mrs means married.
pub struct CleanMrsTitle;

impl Operation for CleanMrsTitle {
    fn name(&self) -> &str {
        "clean_mrs_title"
    }

    fn apply(&self, frame: Frame) -> Result<Frame, Error> {
        recode_titles(frame, |title, _| match title {
            "Mrs" => Some(Value::from("Married")),
            _ => None,
        })
    }
}

/// Mr under 18 is an adolescent and loses the title; under 27 is single;
/// 27 and older gets a weighted coin flip between married and single.
///
/// The coin draws from a `StdRng` seeded with an explicit seed so the
/// recoding is reproducible; the rows are visited in order and a draw
/// happens only for the rows the rule matches.
pub struct CleanMrTitle {
    seed: u64,
}

impl CleanMrTitle {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl Operation for CleanMrTitle {
    fn name(&self) -> &str {
        "clean_mr_title"
    }

    fn apply(&self, frame: Frame) -> Result<Frame, Error> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        recode_titles(frame, move |title, age| match (title, age) {
            ("Mr", Some(a)) if a < 18.0 => Some(Value::Missing),
            ("Mr", Some(a)) if a < 27.0 => Some(Value::from("Single")),
            ("Mr", Some(_)) => {
                // 47% married, 53% single for the older gentlemen.
                let married = rng.gen::<f64>() > 0.53;
                Some(Value::from(if married { "Married" } else { "Single" }))
            }
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with(name: &str, cells: Vec<Value>) -> Frame {
        Frame::from_columns(vec![(name.to_string(), cells)]).unwrap()
    }

    fn title_age_frame(rows: Vec<(Value, Value)>) -> Frame {
        let (titles, ages) = rows.into_iter().unzip();
        Frame::from_columns(vec![("Title".to_string(), titles), ("Age".to_string(), ages)])
            .unwrap()
    }

    #[test]
    fn test_deck_single_token_idempotent() {
        let frame = frame_with("Cabin", vec![Value::from("C85")]);
        let out = EngineerDeck.apply(frame).unwrap();
        assert_eq!(out.column("Deck").unwrap()[0], Value::from("C"));

        // Re-running on the resolved deck letter yields the same letter.
        let again = frame_with("Cabin", vec![Value::from("C")]);
        let out = EngineerDeck.apply(again).unwrap();
        assert_eq!(out.column("Deck").unwrap()[0], Value::from("C"));
    }

    #[test]
    fn test_deck_multi_cabin_takes_lowest() {
        let frame = frame_with("Cabin", vec![Value::from("F G63")]);
        let out = EngineerDeck.apply(frame).unwrap();
        assert_eq!(out.column("Deck").unwrap()[0], Value::from("G"));
    }

    #[test]
    fn test_deck_top_deck_quirk() {
        // T sorts above G, so a booking spanning both resolves to T even
        // though G is the lower deck. Accepted approximation.
        let frame = frame_with("Cabin", vec![Value::from("G6 T10")]);
        let out = EngineerDeck.apply(frame).unwrap();
        assert_eq!(out.column("Deck").unwrap()[0], Value::from("T"));
    }

    #[test]
    fn test_deck_rejects_missing_cabin() {
        let frame = frame_with("Cabin", vec![Value::Missing]);
        assert!(EngineerDeck.apply(frame).is_err());
    }

    #[test]
    fn test_port_parity_and_unknowns() {
        let frame = frame_with(
            "Cabin",
            vec![
                Value::from("C27"),
                Value::from("C28"),
                Value::from("C27 C28"),
                Value::from("F"),
            ],
        );
        let out = EngineerPort.apply(frame).unwrap();
        let ports = out.column("Port").unwrap();
        assert_eq!(ports[0], Value::from("P"));
        assert_eq!(ports[1], Value::from("S"));
        assert_eq!(ports[2], Value::from("U"));
        assert_eq!(ports[3], Value::from("U"));
    }

    #[test]
    fn test_family_size() {
        let frame = Frame::from_columns(vec![
            ("SibSp".to_string(), vec![Value::Num(1.0)]),
            ("Parch".to_string(), vec![Value::Num(2.0)]),
        ])
        .unwrap();
        let out = EngineerFamilySize.apply(frame).unwrap();
        assert_eq!(out.numeric("FamilySize").unwrap(), vec![4.0]);
    }

    #[test]
    fn test_title_extraction() {
        let frame = frame_with(
            "Name",
            vec![
                Value::from("Braund, Mr. Owen Harris"),
                Value::from("Heikkinen, Miss. Laina"),
            ],
        );
        let out = EngineerTitle.apply(frame).unwrap();
        let titles = out.column("Title").unwrap();
        assert_eq!(titles[0], Value::from("Mr"));
        assert_eq!(titles[1], Value::from("Miss"));
    }

    #[test]
    fn test_title_extraction_rejects_odd_name() {
        let frame = frame_with("Name", vec![Value::from("no comma here")]);
        assert!(matches!(EngineerTitle.apply(frame), Err(Error::Parse(_))));
    }

    #[test]
    fn test_uncommon_titles_collapse_below_threshold() {
        let mut cells: Vec<Value> = std::iter::repeat(Value::from("Mr")).take(10).collect();
        cells.push(Value::from("Capt"));
        let frame = frame_with("Title", cells);
        let out = CleanUncommonTitles::default().apply(frame).unwrap();
        let titles = out.column("Title").unwrap();
        // Exactly 10 occurrences is preserved, 1 occurrence collapses.
        assert_eq!(titles[0], Value::from("Mr"));
        assert_eq!(titles[10], Value::from("Rare"));
    }

    #[test]
    fn test_master_rules_keep_exact_eighteen() {
        let frame = title_age_frame(vec![
            (Value::from("Master"), Value::Num(4.0)),
            (Value::from("Master"), Value::Num(18.0)),
            (Value::from("Master"), Value::Num(30.0)),
        ]);
        let out = CleanMasterTitle.apply(frame).unwrap();
        let titles = out.column("Title").unwrap();
        assert!(titles[0].is_missing());
        assert_eq!(titles[1], Value::from("Master"));
        assert_eq!(titles[2], Value::from("Rank"));
    }

    #[test]
    fn test_miss_rules() {
        let frame = title_age_frame(vec![
            (Value::from("Miss"), Value::Num(10.0)),
            (Value::from("Miss"), Value::Num(18.0)),
        ]);
        let out = CleanMissTitle.apply(frame).unwrap();
        let titles = out.column("Title").unwrap();
        assert!(titles[0].is_missing());
        assert_eq!(titles[1], Value::from("Single"));
    }

    #[test]
    fn test_mrs_rule_ignores_age() {
        let frame = title_age_frame(vec![(Value::from("Mrs"), Value::Missing)]);
        let out = CleanMrsTitle.apply(frame).unwrap();
        assert_eq!(out.column("Title").unwrap()[0], Value::from("Married"));
    }

    #[test]
    fn test_mr_rules_below_cutoffs() {
        let frame = title_age_frame(vec![
            (Value::from("Mr"), Value::Num(16.0)),
            (Value::from("Mr"), Value::Num(22.0)),
        ]);
        let out = CleanMrTitle::new(0).apply(frame).unwrap();
        let titles = out.column("Title").unwrap();
        assert!(titles[0].is_missing());
        assert_eq!(titles[1], Value::from("Single"));
    }

    #[test]
    fn test_mr_coin_is_seed_deterministic() {
        let rows = || {
            title_age_frame(
                (0..20)
                    .map(|_| (Value::from("Mr"), Value::Num(40.0)))
                    .collect(),
            )
        };
        let first = CleanMrTitle::new(7).apply(rows()).unwrap();
        let second = CleanMrTitle::new(7).apply(rows()).unwrap();
        assert_eq!(first, second);

        // Every outcome is one of the two recodes.
        for title in first.column("Title").unwrap() {
            let t = title.as_str().unwrap();
            assert!(t == "Married" || t == "Single");
        }
    }

    #[test]
    fn test_mr_with_missing_age_untouched() {
        let frame = title_age_frame(vec![(Value::from("Mr"), Value::Missing)]);
        let out = CleanMrTitle::new(0).apply(frame).unwrap();
        assert_eq!(out.column("Title").unwrap()[0], Value::from("Mr"));
    }
}
