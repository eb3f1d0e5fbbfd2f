//! Extraction of numbered questions from generated text.
//!
//! The expected layout is
//!
//! ```text
//! Question 1 (Python):
//! How do list comprehensions differ from generator expressions?
//!
//! Question 2 (SQL):
//! When would you use a LEFT JOIN instead of an INNER JOIN?
//! ```
//!
//! Headers may drift: Markdown emphasis or heading markers around them, a
//! `.` instead of `:`, or the question text on the header line itself.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::TechnicalQuestion;

lazy_static! {
    /// "Question <n> (" and everything after the opening parenthesis
    static ref HEADER: Regex =
        Regex::new(r"(?i)^\s*(?:#+\s*)?(?:\*\*|__)?\s*question\s+(\d+)\s*\((.*)$")
            .expect("header pattern is valid");
    /// What follows the label's closing parenthesis, capturing inline text
    static ref SEPARATOR: Regex = Regex::new(r"^\s*(?:\*\*|__)?\s*[:.]\s*(?:\*\*|__)?\s*(.*)$")
        .expect("separator pattern is valid");
    /// Label without nested parentheses, for technologies nobody declared
    static ref PLAIN_LABEL: Regex = Regex::new(r"^([^()\n]+)\)").expect("label pattern is valid");
}

/// Result of parsing, with counts of what was discarded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Accepted questions in declaration order
    pub questions: Vec<TechnicalQuestion>,
    /// Headers naming a technology that was not declared
    pub undeclared: usize,
    /// Later questions for a technology that already had one
    pub duplicates: usize,
    /// Headers with no question text under them
    pub empty: usize,
}

impl ParseReport {
    pub fn dropped(&self) -> usize {
        self.undeclared + self.duplicates + self.empty
    }
}

/// A header line and the text collected under it
struct Block<'a> {
    number: u32,
    label: &'a str,
    body: String,
}

/// Parse generated text into questions, ordered like `expected_technologies`.
///
/// Never fails: malformed text yields an empty list.
pub fn parse_questions(raw_text: &str, expected_technologies: &[String]) -> Vec<TechnicalQuestion> {
    parse_report(raw_text, expected_technologies).questions
}

/// Same as [`parse_questions`] but also reports what was dropped
pub fn parse_report(raw_text: &str, expected_technologies: &[String]) -> ParseReport {
    let expected_lower: Vec<String> = expected_technologies
        .iter()
        .map(|t| t.trim().to_lowercase())
        .collect();

    let mut slots: Vec<Option<String>> = vec![None; expected_technologies.len()];
    let mut report = ParseReport::default();

    for block in scan_blocks(raw_text, expected_technologies) {
        let label = block.label.trim().to_lowercase();
        let Some(index) = expected_lower.iter().position(|t| *t == label) else {
            debug!(
                number = block.number,
                label = block.label,
                "Dropping question for undeclared technology"
            );
            report.undeclared += 1;
            continue;
        };

        if block.body.is_empty() {
            debug!(number = block.number, "Dropping header without question text");
            report.empty += 1;
            continue;
        }

        if slots[index].is_some() {
            debug!(
                number = block.number,
                technology = %expected_technologies[index],
                "Dropping duplicate question"
            );
            report.duplicates += 1;
            continue;
        }

        slots[index] = Some(block.body);
    }

    report.questions = expected_technologies
        .iter()
        .zip(slots)
        .filter_map(|(tech, body)| body.map(|text| TechnicalQuestion::new(tech.clone(), text)))
        .collect();

    report
}

fn scan_blocks<'a>(raw_text: &'a str, expected_technologies: &[String]) -> Vec<Block<'a>> {
    let mut blocks: Vec<Block<'_>> = Vec::new();
    let mut current: Option<(u32, &str, Vec<&str>)> = None;

    for line in raw_text.lines() {
        if let Some((number, label, inline)) = match_header(line, expected_technologies) {
            if let Some(done) = current.take() {
                blocks.push(finish_block(done));
            }
            current = Some((number, label, vec![inline]));
        } else if let Some((_, _, ref mut lines)) = current {
            lines.push(line);
        }
        // Text before the first header is preamble and ignored
    }

    if let Some(done) = current.take() {
        blocks.push(finish_block(done));
    }

    blocks
}

/// Recognize a header line, returning its number, label and inline text.
///
/// Declared technologies are matched literally first, longest first, so a
/// label such as `Node.js (Express)` keeps its own parentheses.
fn match_header<'a>(
    line: &'a str,
    expected_technologies: &[String],
) -> Option<(u32, &'a str, &'a str)> {
    let caps = HEADER.captures(line)?;
    let number = caps
        .get(1)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    let rest = caps.get(2)?.as_str().trim_start();

    let mut declared: Vec<&str> = expected_technologies.iter().map(|t| t.trim()).collect();
    declared.sort_by_key(|t| std::cmp::Reverse(t.len()));

    for tech in declared.into_iter().filter(|t| !t.is_empty()) {
        let Some(prefix) = rest.get(..tech.len()) else {
            continue;
        };
        if prefix.to_lowercase() != tech.to_lowercase() {
            continue;
        }
        let Some(after) = rest[tech.len()..].trim_start().strip_prefix(')') else {
            continue;
        };
        if let Some(sep) = SEPARATOR.captures(after) {
            let inline = sep.get(1).map_or("", |m| m.as_str());
            return Some((number, prefix, inline));
        }
    }

    let label = PLAIN_LABEL.captures(rest)?.get(1)?;
    let sep = SEPARATOR.captures(&rest[label.end() + 1..])?;
    Some((number, label.as_str(), sep.get(1).map_or("", |m| m.as_str())))
}

fn finish_block<'a>((number, label, lines): (u32, &'a str, Vec<&str>)) -> Block<'a> {
    let body = lines.join("\n").trim().to_string();
    Block {
        number,
        label,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn pairs(questions: &[TechnicalQuestion]) -> Vec<(&str, &str)> {
        questions
            .iter()
            .map(|q| (q.technology().unwrap_or(""), q.text()))
            .collect()
    }

    #[test]
    fn test_parse_well_formed_output() {
        let raw = "Question 1 (Python):\nWhat is a list comprehension?\n\nQuestion 2 (SQL):\nWhat does GROUP BY do?";
        let questions = parse_questions(raw, &stack(&["Python", "SQL"]));
        assert_eq!(
            pairs(&questions),
            vec![
                ("Python", "What is a list comprehension?"),
                ("SQL", "What does GROUP BY do?"),
            ]
        );
    }

    #[test]
    fn test_parse_reorders_to_declaration_order() {
        let raw = "Question 2 (SQL):\nWhat is an index?\nQuestion 1 (Python):\nWhat is a decorator?";
        let questions = parse_questions(raw, &stack(&["Python", "SQL"]));
        assert_eq!(
            pairs(&questions),
            vec![("Python", "What is a decorator?"), ("SQL", "What is an index?")]
        );
    }

    #[test]
    fn test_parse_drops_undeclared_technology() {
        let raw = "Question 1 (Python):\nWhat is a generator?\nQuestion 2 (Django):\nWhat is a model?";
        let report = parse_report(raw, &stack(&["Python"]));
        assert_eq!(pairs(&report.questions), vec![("Python", "What is a generator?")]);
        assert_eq!(report.undeclared, 1);
    }

    #[test]
    fn test_parse_keeps_first_duplicate() {
        let raw = "Question 1 (Rust):\nWhat is borrowing?\nQuestion 2 (rust):\nWhat is a lifetime?";
        let report = parse_report(raw, &stack(&["Rust"]));
        assert_eq!(pairs(&report.questions), vec![("Rust", "What is borrowing?")]);
        assert_eq!(report.duplicates, 1);
    }

    #[test]
    fn test_parse_uses_declared_spelling() {
        let raw = "Question 1 (postgresql):\nWhat is MVCC?";
        let questions = parse_questions(raw, &stack(&["PostgreSQL"]));
        assert_eq!(questions[0].technology(), Some("PostgreSQL"));
    }

    #[test]
    fn test_parse_omits_missing_technology() {
        let raw = "Question 1 (Python):\nWhat is GIL?";
        let questions = parse_questions(raw, &stack(&["Python", "SQL", "Docker"]));
        assert_eq!(questions.len(), 1);
    }

    #[test]
    fn test_parse_without_headers_is_empty() {
        let raw = "Sure! Here are some great questions about Python and SQL.";
        assert!(parse_questions(raw, &stack(&["Python", "SQL"])).is_empty());
        assert!(parse_questions("", &stack(&["Python"])).is_empty());
    }

    #[test]
    fn test_parse_tolerates_markdown_and_inline_text() {
        let raw = "Here you go:\n\n**Question 1 (Python):**\nWhat is duck typing?\n\n### Question 2 (SQL). What is a primary key?\n";
        let questions = parse_questions(raw, &stack(&["Python", "SQL"]));
        assert_eq!(
            pairs(&questions),
            vec![
                ("Python", "What is duck typing?"),
                ("SQL", "What is a primary key?"),
            ]
        );
    }

    #[test]
    fn test_parse_multiline_body_is_trimmed() {
        let raw = "Question 1 (Docker):\n\n  Explain what a Docker image layer is,\n  in your own words.  \n\n";
        let questions = parse_questions(raw, &stack(&["Docker"]));
        assert_eq!(
            questions[0].text(),
            "Explain what a Docker image layer is,\n  in your own words."
        );
    }

    #[test]
    fn test_parse_drops_empty_body() {
        let raw = "Question 1 (Python):\n\nQuestion 2 (SQL):\nWhat is a view?";
        let report = parse_report(raw, &stack(&["Python", "SQL"]));
        assert_eq!(pairs(&report.questions), vec![("SQL", "What is a view?")]);
        assert_eq!(report.empty, 1);
        assert_eq!(report.dropped(), 1);
    }

    #[test]
    fn test_parse_technology_with_parentheses() {
        let expected = stack(&["SQL", "Node.js (Express)"]);

        let raw = "Question 1 (SQL):\nWhat is a join?\n\nQuestion 2 (Node.js (Express)):\nWhat is middleware?";
        assert_eq!(
            pairs(&parse_questions(raw, &expected)),
            vec![("SQL", "What is a join?"), ("Node.js (Express)", "What is middleware?")]
        );

        let raw = "Question 1 (node.js (express)):\nWhat is middleware?\n\nQuestion 2 (SQL):\nWhat is a join?";
        assert_eq!(
            pairs(&parse_questions(raw, &expected)),
            vec![("SQL", "What is a join?"), ("Node.js (Express)", "What is middleware?")]
        );
    }

    #[test]
    fn test_parse_inline_text_with_parentheses() {
        let raw = "Question 1 (Python): What does f(x) return when x is None?";
        let questions = parse_questions(raw, &stack(&["Python"]));
        assert_eq!(
            pairs(&questions),
            vec![("Python", "What does f(x) return when x is None?")]
        );
    }

    #[test]
    fn test_parse_technology_with_symbols() {
        let raw = "Question 1 (C++):\nWhat is RAII?\nQuestion 2 (C#):\nWhat is LINQ?";
        let questions = parse_questions(raw, &stack(&["C++", "C#"]));
        assert_eq!(questions.len(), 2);
    }
}
