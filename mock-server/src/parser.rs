//! A toy deterministic tagger and parser.
//!
//! Only the output shapes match the real TweeboParser; the analysis itself is
//! a handful of rules, enough to produce roots, detached tokens and
//! multi-word expressions for the client tests.

use serde::{Deserialize, Serialize};

pub const NO_HEAD: i64 = -1;
pub const DETACHED_GLOSS: &str = "$$NAN$$";
pub const ROOT_LABEL: &str = "ROOT";
pub const MWE_LABEL: &str = "MWE";

/// Tags whose tokens never get a head.
const DETACHED_TAGS: [&str; 4] = ["@", "U", "~", ","];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub index: i64,
    pub word: String,
    pub original_text: String,
    pub pos: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub dep: String,
    pub governor: i64,
    pub governor_gloss: String,
    pub dependent: i64,
    pub dependent_gloss: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sentence {
    pub index: usize,
    pub tokens: Vec<Token>,
    pub basic_dependencies: Vec<Dependency>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Analyzed<'a> {
    pub word: &'a str,
    pub pos: &'static str,
    pub head: i64,
    pub mwe: bool,
}

pub fn tag(word: &str) -> &'static str {
    if word.starts_with("http://") || word.starts_with("https://") || word.starts_with("www.") {
        "U"
    } else if word.len() > 1 && word.starts_with('@') {
        "@"
    } else if word.len() > 1 && word.starts_with('#') {
        "#"
    } else if word == "RT" || word == ":" {
        "~"
    } else if word.chars().all(|c| c.is_ascii_punctuation()) {
        ","
    } else if word.chars().all(|c| c.is_ascii_digit()) {
        "$"
    } else if word.chars().next().is_some_and(char::is_uppercase) {
        "^"
    } else {
        "N"
    }
}

/// Tokenize on whitespace, tag, and assign heads.
///
/// A `^` token directly followed by another `^` token continues a
/// multi-word expression headed by the next token. The first remaining
/// attachable token is the root; each later one attaches to the previous.
pub fn analyze(text: &str) -> Vec<Analyzed<'_>> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let tags: Vec<&'static str> = words.iter().map(|w| tag(w)).collect();

    let mut previous: Option<i64> = None;
    let mut out = Vec::with_capacity(words.len());
    for (i, (&word, &pos)) in words.iter().zip(&tags).enumerate() {
        let index = i as i64 + 1;
        let (head, mwe) = if DETACHED_TAGS.contains(&pos) {
            (NO_HEAD, false)
        } else if pos == "^" && tags.get(i + 1) == Some(&"^") {
            (index + 1, true)
        } else {
            let head = previous.unwrap_or(0);
            previous = Some(index);
            (head, false)
        };
        out.push(Analyzed {
            word,
            pos,
            head,
            mwe,
        });
    }
    out
}

/// Tab-separated rows, no trailing newline. Blank text renders as `""`.
pub fn render_table(text: &str) -> String {
    analyze(text)
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let rel = if t.mwe { MWE_LABEL } else { "_" };
            format!("{}\t{}\t_\t{}\t{}\t_\t{}\t{}", i + 1, t.word, t.pos, t.pos, t.head, rel)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_tree(index: usize, text: &str) -> Sentence {
    let analyzed = analyze(text);
    let gloss = |head: i64| -> String {
        match head {
            NO_HEAD => DETACHED_GLOSS.to_string(),
            0 => ROOT_LABEL.to_string(),
            h => analyzed[(h - 1) as usize].word.to_string(),
        }
    };

    let tokens = analyzed
        .iter()
        .enumerate()
        .map(|(i, t)| Token {
            index: i as i64 + 1,
            word: t.word.to_string(),
            original_text: t.word.to_string(),
            pos: t.pos.to_string(),
        })
        .collect();

    let basic_dependencies = analyzed
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let dep = if t.mwe {
                MWE_LABEL
            } else if t.head == 0 {
                ROOT_LABEL
            } else {
                "_"
            };
            Dependency {
                dep: dep.to_string(),
                governor: t.head,
                governor_gloss: gloss(t.head),
                dependent: i as i64 + 1,
                dependent_gloss: t.word.to_string(),
            }
        })
        .collect();

    Sentence {
        index,
        tokens,
        basic_dependencies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_twitter_tokens() {
        assert_eq!(tag("@e_one"), "@");
        assert_eq!(tag("#nlp"), "#");
        assert_eq!(tag("http://tl.gd/6meogh"), "U");
        assert_eq!(tag("RT"), "~");
        assert_eq!(tag(":"), "~");
        assert_eq!(tag("?????"), ",");
        assert_eq!(tag("2010"), "$");
        assert_eq!(tag("Texas"), "^");
        assert_eq!(tag("》have"), "N");
        assert_eq!(tag("@"), ",");
    }

    #[test]
    fn detached_tokens_and_chain() {
        let table = render_table("RT @DjBlack_Pearl : wat lingerie party ?????");
        let expected = "1\tRT\t_\t~\t~\t_\t-1\t_\n\
                        2\t@DjBlack_Pearl\t_\t@\t@\t_\t-1\t_\n\
                        3\t:\t_\t~\t~\t_\t-1\t_\n\
                        4\twat\t_\tN\tN\t_\t0\t_\n\
                        5\tlingerie\t_\tN\tN\t_\t4\t_\n\
                        6\tparty\t_\tN\tN\t_\t5\t_\n\
                        7\t?????\t_\t,\t,\t_\t-1\t_";
        assert_eq!(table, expected);
    }

    #[test]
    fn capitalized_runs_form_mwe() {
        let sentence = render_tree(0, "watching Cliff Lee today");
        let deps = &sentence.basic_dependencies;
        assert_eq!(deps[0].dep, ROOT_LABEL);
        assert_eq!(deps[0].governor_gloss, ROOT_LABEL);
        assert_eq!((deps[1].dep.as_str(), deps[1].governor), (MWE_LABEL, 3));
        assert_eq!(deps[1].governor_gloss, "Lee");
        assert_eq!((deps[2].dep.as_str(), deps[2].governor), ("_", 1));
        assert_eq!((deps[3].governor, deps[3].governor_gloss.as_str()), (3, "Lee"));
    }

    #[test]
    fn detached_edges_use_nan_gloss() {
        let sentence = render_tree(2, "hi :)");
        assert_eq!(sentence.index, 2);
        let last = sentence.basic_dependencies.last().unwrap();
        assert_eq!(last.governor, NO_HEAD);
        assert_eq!(last.governor_gloss, DETACHED_GLOSS);
    }

    #[test]
    fn blank_text_renders_empty() {
        assert_eq!(render_table("   "), "");
        let sentence = render_tree(4, "");
        assert!(sentence.tokens.is_empty());
        assert!(sentence.basic_dependencies.is_empty());
        assert_eq!(sentence.index, 4);
    }

    #[test]
    fn sentence_serializes_camel_case() {
        let json = serde_json::to_value(render_tree(0, "wat")).unwrap();
        assert_eq!(json["tokens"][0]["originalText"], "wat");
        assert_eq!(json["basicDependencies"][0]["governorGloss"], "ROOT");
        assert_eq!(json["basicDependencies"][0]["dependentGloss"], "wat");
    }
}
