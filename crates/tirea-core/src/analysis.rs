// Analysis record produced by the matcher

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One way of reading a word (or a multi-word phrase) against the dictionary.
///
/// Every affix list is ordered outermost first: the matcher prepends labels
/// while it unwinds from the stem outwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Analysis {
    /// Entry identifier of the headword (or phrase).
    pub id: String,
    /// 1-based word position within extracted text. 0 for single words.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "index", skip_serializing_if = "is_zero")
    )]
    pub position: usize,
    /// Part of speech, for entries that are homographs across categories.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub pos: Option<String>,
    /// Unmatched text after the word.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    pub remainder: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub prefixes: Vec<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub infixes: Vec<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub suffixes: Vec<String>,
    /// Lenition labels such as `t→s` or `'e→e`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub lenitions: Vec<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub particles: Vec<String>,
}

#[cfg(feature = "serde")]
fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl Analysis {
    /// Create an analysis for an entry with no affixes.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Set the part of speech.
    pub fn with_pos(mut self, pos: impl Into<String>) -> Self {
        self.pos = Some(pos.into());
        self
    }

    /// Total number of affixes, lenitions and particles.
    pub fn affix_count(&self) -> usize {
        self.prefixes.len()
            + self.infixes.len()
            + self.suffixes.len()
            + self.lenitions.len()
            + self.particles.len()
    }

    /// Check whether this analysis satisfies a phrase template slot.
    ///
    /// Id and part of speech must be equal. Every non-empty list in the
    /// template must be a subset of the corresponding list here; an empty
    /// template list accepts anything.
    pub fn covered_by(&self, template: &Analysis) -> bool {
        self.id == template.id
            && self.pos == template.pos
            && subset(&template.prefixes, &self.prefixes)
            && subset(&template.infixes, &self.infixes)
            && subset(&template.suffixes, &self.suffixes)
            && subset(&template.lenitions, &self.lenitions)
            && subset(&template.particles, &self.particles)
    }

    /// Add every affix of `other` that the template does not already name.
    pub fn add_affixes_from(&mut self, other: &Analysis, template: &Analysis) {
        merge_missing(&mut self.prefixes, &other.prefixes, &template.prefixes);
        merge_missing(&mut self.infixes, &other.infixes, &template.infixes);
        merge_missing(&mut self.suffixes, &other.suffixes, &template.suffixes);
        merge_missing(&mut self.lenitions, &other.lenitions, &template.lenitions);
        merge_missing(&mut self.particles, &other.particles, &template.particles);
    }
}

fn subset(template: &[String], actual: &[String]) -> bool {
    template.iter().all(|t| actual.contains(t))
}

fn merge_missing(into: &mut Vec<String>, from: &[String], template: &[String]) {
    for item in from {
        if !template.contains(item) && !into.contains(item) {
            into.push(item.clone());
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[String], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        f.write_str(item)?;
    }
    Ok(())
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.position > 0 {
            write!(f, "[{}] ", self.position)?;
        }
        f.write_str(&self.id)?;
        if let Some(pos) = &self.pos {
            write!(f, ":{pos}")?;
        }
        if !self.prefixes.is_empty() {
            f.write_str(" ")?;
            for prefix in &self.prefixes {
                write!(f, "{prefix}-")?;
            }
        }
        if !self.infixes.is_empty() {
            f.write_str(" <")?;
            write_joined(f, &self.infixes, ",")?;
            f.write_str(">")?;
        }
        if !self.suffixes.is_empty() {
            f.write_str(" ")?;
            for suffix in &self.suffixes {
                write!(f, "-{suffix}")?;
            }
        }
        if !self.lenitions.is_empty() {
            f.write_str(" ")?;
            write_joined(f, &self.lenitions, ",")?;
        }
        if !self.particles.is_empty() {
            f.write_str(" [")?;
            write_joined(f, &self.particles, ",")?;
            f.write_str("]")?;
        }
        if !self.remainder.is_empty() {
            write!(f, " +{}", self.remainder)?;
        }
        Ok(())
    }
}

/// Reduce a position-tagged result list to one analysis per position, the
/// one with the fewest affixes. The earliest wins a tie.
///
/// Positions without any analysis are left out.
pub fn simplest_result_set(results: &[Analysis]) -> Vec<Analysis> {
    let Some(last) = results.iter().map(|r| r.position).max() else {
        return Vec::new();
    };

    let mut best: Vec<Option<&Analysis>> = vec![None; last];
    for result in results {
        let Some(slot) = result.position.checked_sub(1).and_then(|p| best.get_mut(p)) else {
            continue;
        };
        match slot {
            Some(current) if current.affix_count() <= result.affix_count() => {}
            _ => *slot = Some(result),
        }
    }

    best.into_iter().flatten().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn display_plain() {
        assert_eq!(Analysis::new("392").to_string(), "392");
        assert_eq!(Analysis::new("392").with_pos("n.").to_string(), "392:n.");
    }

    #[test]
    fn display_all_parts() {
        let analysis = Analysis {
            id: "392".into(),
            position: 3,
            pos: Some("n.".into()),
            remainder: " si".into(),
            prefixes: strings(&["pe", "pxe", "tì"]),
            infixes: strings(&["äpeyk", "ìlm"]),
            suffixes: strings(&["ti", "o"]),
            lenitions: strings(&["p→f", "px→p"]),
            particles: strings(&["ke", "rä'ä"]),
        };
        assert_eq!(
            analysis.to_string(),
            "[3] 392:n. pe-pxe-tì- <äpeyk,ìlm> -ti-o p→f,px→p [ke,rä'ä] + si"
        );
    }

    #[test]
    fn covered_by_empty_template_lists_accept_anything() {
        let mut actual = Analysis::new("2644");
        actual.prefixes = strings(&["fì"]);
        actual.suffixes = strings(&["ti"]);

        assert!(actual.covered_by(&Analysis::new("2644")));
        assert!(!actual.covered_by(&Analysis::new("2644").with_pos("n.")));
        assert!(!actual.covered_by(&Analysis::new("2648")));

        let mut template = Analysis::new("2644");
        template.suffixes = strings(&["ti"]);
        assert!(actual.covered_by(&template));
        template.suffixes = strings(&["ri"]);
        assert!(!actual.covered_by(&template));
    }

    #[test]
    fn add_affixes_skips_template_and_duplicates() {
        let mut template = Analysis::new("1");
        template.suffixes = strings(&["t"]);

        let mut other = Analysis::new("10");
        other.suffixes = strings(&["t", "ri"]);
        other.lenitions = strings(&["t→s"]);

        let mut phrase = Analysis::new("p");
        phrase.add_affixes_from(&other, &template);
        phrase.add_affixes_from(&other, &template);
        assert_eq!(phrase.suffixes, strings(&["ri"]));
        assert_eq!(phrase.lenitions, strings(&["t→s"]));
    }

    #[test]
    fn simplest_result_set_picks_fewest_affixes() {
        let tagged = |id: &str, position: usize, prefixes: &[&str]| Analysis {
            id: id.into(),
            position,
            prefixes: strings(prefixes),
            ..Analysis::default()
        };
        let results = vec![
            tagged("a", 1, &["me"]),
            tagged("b", 1, &[]),
            tagged("c", 1, &[]),
            tagged("d", 2, &["fì", "pe"]),
        ];
        let simplest = simplest_result_set(&results);
        let ids: Vec<&str> = simplest.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d"]);
        assert!(simplest_result_set(&[]).is_empty());
    }
}
