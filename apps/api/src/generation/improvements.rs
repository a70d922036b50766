//! Improvement classifier: turns the free-form improvements segment into ordered,
//! titled, categorized records.
//!
//! Pure and deterministic: the same text always yields the same records. Category
//! depends on the title alone, resolved against an ordered keyword table where
//! the first matching group wins.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// A first line shorter than this (in characters) is treated as a title.
const TITLE_MAX_CHARS: usize = 50;

/// Words kept when a title has to be synthesized from the segment text.
const SYNTHESIZED_TITLE_WORDS: usize = 3;

/// Blank-line runs and newline-led bullet markers.
static SEGMENT_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\n+|\n•\s|\n-\s|\n\*\s").expect("valid segment regex"));

/// Bullet marker left at the very start of a segment.
static LEADING_BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[•*-]\s+").expect("valid bullet regex"));

static TRAILING_TITLE_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[:•*-]\s*$").expect("valid punctuation regex"));

static SECTION_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(summary|skills|experience|education|projects|improvements|suggestions|analysis)")
        .expect("valid keyword regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Skills,
    Projects,
    Experience,
    Education,
    Summary,
    General,
}

/// Checked top to bottom; the first group with a matching keyword wins.
const CATEGORY_RULES: &[(&[&str], Category)] = &[
    (&["skill", "technical"], Category::Skills),
    (&["project"], Category::Projects),
    (&["experience", "work"], Category::Experience),
    (&["education"], Category::Education),
    (&["summary", "overview"], Category::Summary),
];

/// One classified piece of feedback. `ordinal` is the 1-based position of the
/// segment in the improvements text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImprovementRecord {
    pub ordinal: usize,
    pub title: String,
    pub body: String,
    pub category: Category,
}

/// Case-insensitive substring match of `title` against [`CATEGORY_RULES`].
pub fn categorize(title: &str) -> Category {
    let lower = title.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, category)| *category)
        .unwrap_or(Category::General)
}

fn segments(text: &str) -> Vec<String> {
    SEGMENT_BOUNDARY
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| LEADING_BULLET.replace(s, "").trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn looks_like_title(line: &str) -> bool {
    line.ends_with(':') || line.chars().count() < TITLE_MAX_CHARS || SECTION_KEYWORD.is_match(line)
}

fn record_for(ordinal: usize, segment: &str) -> ImprovementRecord {
    let mut lines = segment.lines();
    let first_line = lines.next().unwrap_or_default().trim();

    let (mut title, mut body) = if looks_like_title(first_line) {
        (
            TRAILING_TITLE_PUNCTUATION
                .replace(first_line, "")
                .trim()
                .to_string(),
            lines.collect::<Vec<_>>().join("\n").trim().to_string(),
        )
    } else {
        let words: Vec<&str> = first_line.split(' ').take(SYNTHESIZED_TITLE_WORDS).collect();
        (format!("{}...", words.join(" ")), segment.to_string())
    };

    if title.is_empty() {
        title = format!("Improvement {ordinal}");
        body = segment.to_string();
    }
    // Single-line segments are both title and body.
    if body.is_empty() {
        body = segment.to_string();
    }

    ImprovementRecord {
        ordinal,
        category: categorize(&title),
        title,
        body,
    }
}

/// Splits `text` into records in their original order.
pub fn classify(text: &str) -> Vec<ImprovementRecord> {
    segments(text)
        .iter()
        .enumerate()
        .map(|(index, segment)| record_for(index + 1, segment))
        .collect()
}

/// Per-category counts for the summary strip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImprovementSummary {
    pub total: usize,
    pub skills: usize,
    pub projects: usize,
    pub experience: usize,
    /// Education, summary and general records.
    pub other: usize,
}

pub fn summarize(records: &[ImprovementRecord]) -> ImprovementSummary {
    records
        .iter()
        .fold(ImprovementSummary::default(), |mut summary, record| {
            summary.total += 1;
            match record.category {
                Category::Skills => summary.skills += 1,
                Category::Projects => summary.projects += 1,
                Category::Experience => summary.experience += 1,
                Category::Education | Category::Summary | Category::General => {
                    summary.other += 1
                }
            }
            summary
        })
}

/// Display bucket. Records keep their ordinals and relative order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImprovementGroup {
    pub label: &'static str,
    pub categories: &'static [Category],
    pub records: Vec<ImprovementRecord>,
}

const DISPLAY_GROUPS: &[(&str, &[Category])] = &[
    ("Skills Analysis & Enhancements", &[Category::Skills]),
    ("Projects Analysis & Additions", &[Category::Projects]),
    ("Experience Enhancements", &[Category::Experience]),
    (
        "Other Improvements",
        &[Category::Education, Category::Summary, Category::General],
    ),
];

/// Buckets records for display; empty buckets are omitted.
pub fn group_by_category(records: &[ImprovementRecord]) -> Vec<ImprovementGroup> {
    DISPLAY_GROUPS
        .iter()
        .map(|&(label, categories)| ImprovementGroup {
            label,
            categories,
            records: records
                .iter()
                .filter(|r| categories.contains(&r.category))
                .cloned()
                .collect(),
        })
        .filter(|group| !group.records.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "SKILLS ANALYSIS:
- Add TypeScript and Jest to the skills section
- Group tools separately from languages

PROJECTS ANALYSIS:
Only one project is listed; add two React projects with live links.

EXPERIENCE ENHANCEMENTS:
Quantify the impact of the dashboard migration.

The candidate should consider restructuring the whole document so that the strongest achievements appear first.";

    #[test]
    fn test_single_skills_line() {
        let records = classify("Skills: add React");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ordinal, 1);
        assert_eq!(records[0].title, "Skills: add React");
        assert_eq!(records[0].body, "Skills: add React");
        assert_eq!(records[0].category, Category::Skills);
    }

    #[test]
    fn test_category_precedence_skills_before_experience() {
        assert_eq!(categorize("Technical Skills and Experience"), Category::Skills);
        assert_eq!(categorize("Project work"), Category::Projects);
        assert_eq!(categorize("Work history"), Category::Experience);
        assert_eq!(categorize("EDUCATION"), Category::Education);
        assert_eq!(categorize("Profile overview"), Category::Summary);
        assert_eq!(categorize("ATS optimization"), Category::General);
    }

    #[test]
    fn test_sample_segments_and_titles() {
        let records = classify(SAMPLE);
        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "SKILLS ANALYSIS",
                "Add TypeScript and Jest to the skills section",
                "Group tools separately from languages",
                "PROJECTS ANALYSIS",
                "EXPERIENCE ENHANCEMENTS",
                "The candidate should...",
            ]
        );
        assert_eq!(records[0].category, Category::Skills);
        assert_eq!(records[3].category, Category::Projects);
        assert_eq!(
            records[3].body,
            "Only one project is listed; add two React projects with live links."
        );
        assert_eq!(records[4].category, Category::Experience);
        assert_eq!(records[5].category, Category::General);
        assert_eq!(records[5].body, records[5].body.trim());
        assert!(records[5].body.starts_with("The candidate should consider"));
    }

    #[test]
    fn test_ordinals_follow_segment_order() {
        let records = classify(SAMPLE);
        let ordinals: Vec<usize> = records.iter().map(|r| r.ordinal).collect();
        assert_eq!(ordinals, (1..=records.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_every_record_has_a_body() {
        for text in [SAMPLE, "Skills:", "a\n\n\n\nb", "• one\n• two", ":\nbody"] {
            for record in classify(text) {
                assert!(!record.body.trim().is_empty(), "{text:?} -> {record:?}");
            }
        }
    }

    #[test]
    fn test_empty_title_gets_positional_placeholder() {
        let records = classify("first note\n\n:\nsecond note body");
        assert_eq!(records[1].title, "Improvement 2");
        assert_eq!(records[1].body, ":\nsecond note body");
    }

    #[test]
    fn test_leading_bullet_is_stripped() {
        let records = classify("- Add Docker\n- Add Kubernetes");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Add Docker");
        assert_eq!(records[1].title, "Add Kubernetes");
    }

    #[test]
    fn test_long_keyword_line_is_still_a_title() {
        let line = "Summary of the most important changes made across the whole document";
        let records = classify(&format!("{line}\nRewrote the profile."));
        assert_eq!(records[0].title, line);
        assert_eq!(records[0].body, "Rewrote the profile.");
        assert_eq!(records[0].category, Category::Summary);
    }

    #[test]
    fn test_whitespace_only_input_yields_nothing() {
        assert!(classify("").is_empty());
        assert!(classify("\n\n   \n\n").is_empty());
    }

    #[test]
    fn test_classify_is_idempotent() {
        assert_eq!(classify(SAMPLE), classify(SAMPLE));
    }

    #[test]
    fn test_summary_counts() {
        let summary = summarize(&classify(SAMPLE));
        assert_eq!(summary.total, 6);
        assert_eq!(summary.skills, 2);
        assert_eq!(summary.projects, 1);
        assert_eq!(summary.experience, 1);
        assert_eq!(summary.other, 2);
    }

    #[test]
    fn test_grouping_keeps_ordinals() {
        let records = classify(SAMPLE);
        let groups = group_by_category(&records);
        let labels: Vec<&str> = groups.iter().map(|g| g.label).collect();
        assert_eq!(
            labels,
            vec![
                "Skills Analysis & Enhancements",
                "Projects Analysis & Additions",
                "Experience Enhancements",
                "Other Improvements",
            ]
        );
        for group in &groups {
            for record in &group.records {
                assert_eq!(&records[record.ordinal - 1], record);
            }
        }
    }

    #[test]
    fn test_grouping_omits_empty_buckets() {
        let groups = group_by_category(&classify("Education: list your degree"));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, "Other Improvements");
    }
}
