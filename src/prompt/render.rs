//! Template rendering with single-pass variable substitution.

use regex_lite::Regex;

use crate::error::TemplateError;
use crate::git::CommitSummary;

use super::style::PromptStyle;

/// The fixed variable vocabulary templates may reference.
pub const RECOGNIZED_VARIABLES: [&str; 10] = [
    "commit_message",
    "commit_hash",
    "short_hash",
    "author",
    "date",
    "files_changed",
    "diff_summary",
    "insertions",
    "deletions",
    "files_count",
];

/// Rendered (system, user) prompt pair ready for a generation client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    pub system: String,
    pub user: String,
}

fn placeholder_regex() -> Regex {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap()
}

/// Reject any placeholder outside [`RECOGNIZED_VARIABLES`].
///
/// `location` names the offending text block ("system" or "template") in
/// the error.
pub fn validate_text(text: &str, location: &str) -> Result<(), TemplateError> {
    let re = placeholder_regex();

    for caps in re.captures_iter(text) {
        let name = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        if !RECOGNIZED_VARIABLES.contains(&name) {
            return Err(TemplateError::UnknownPlaceholder {
                name: name.to_string(),
                location: location.to_string(),
                available: RECOGNIZED_VARIABLES.join(", "),
            });
        }
    }

    Ok(())
}

/// Render a style against a commit summary.
///
/// Validates both texts first (so bad templates fail before any generation
/// call), then substitutes the recognized variables literally. Substitution
/// is a single pass over the original text: a substituted value containing
/// `{...}` is left verbatim, never expanded recursively.
pub fn render(style: &PromptStyle, summary: &CommitSummary) -> Result<RenderedPrompt, TemplateError> {
    style.validate()?;

    Ok(RenderedPrompt {
        system: substitute(&style.system, summary),
        user: substitute(&style.template, summary),
    })
}

fn substitute(text: &str, summary: &CommitSummary) -> String {
    let re = placeholder_regex();

    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in re.captures_iter(text) {
        let whole = caps.get(0).unwrap();
        let name = caps.get(1).map(|m| m.as_str()).unwrap_or("");

        out.push_str(&text[last..whole.start()]);
        match variable_value(name, summary) {
            Some(value) => out.push_str(&value),
            // Only reachable when called without validation; keep verbatim
            None => out.push_str(whole.as_str()),
        }
        last = whole.end();
    }

    out.push_str(&text[last..]);
    out
}

fn variable_value(name: &str, summary: &CommitSummary) -> Option<String> {
    match name {
        "commit_message" => Some(summary.message.clone()),
        "commit_hash" => Some(summary.commit_hash.clone()),
        "short_hash" => Some(summary.short_hash.clone()),
        "author" => Some(summary.author.clone()),
        "date" => Some(summary.date.clone()),
        "files_changed" => Some(summary.files_changed_lines()),
        "diff_summary" => Some(summary.diff_summary.clone()),
        "insertions" => Some(summary.insertions.to_string()),
        "deletions" => Some(summary.deletions.to_string()),
        "files_count" => Some(summary.files_count.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::FileChange;

    fn make_summary() -> CommitSummary {
        let files = vec![FileChange {
            path: "a.py".to_string(),
            insertions: 10,
            deletions: 2,
        }];
        CommitSummary {
            commit_hash: "0123456789abcdef0123456789abcdef01234567".to_string(),
            short_hash: "0123456".to_string(),
            message: "fix: handle empty input".to_string(),
            author: "Test User <test@example.com>".to_string(),
            date: "2024-06-01T12:00:00Z".to_string(),
            diff_summary: "a.py (+10/-2)".to_string(),
            insertions: 10,
            deletions: 2,
            files_count: 1,
            files_changed: files,
        }
    }

    fn make_style(system: &str, template: &str) -> PromptStyle {
        PromptStyle {
            key: "test".to_string(),
            name: "Test".to_string(),
            description: String::new(),
            system: system.to_string(),
            template: template.to_string(),
        }
    }

    #[test]
    fn test_render_spec_example() {
        let style = make_style("sys", "{files_count} file changed: {diff_summary}");
        let rendered = render(&style, &make_summary()).unwrap();
        assert_eq!(rendered.user, "1 file changed: a.py (+10/-2)");
    }

    #[test]
    fn test_render_substitutes_system_text() {
        let style = make_style("Post about commit {short_hash} by {author}", "{commit_message}");
        let rendered = render(&style, &make_summary()).unwrap();
        assert_eq!(
            rendered.system,
            "Post about commit 0123456 by Test User <test@example.com>"
        );
        assert_eq!(rendered.user, "fix: handle empty input");
    }

    #[test]
    fn test_render_unknown_placeholder_fails_with_name() {
        let style = make_style("sys", "hello {nonexistent_var}");
        let err = render(&style, &make_summary()).unwrap_err();
        let TemplateError::UnknownPlaceholder { name, location, .. } = err;
        assert_eq!(name, "nonexistent_var");
        assert_eq!(location, "template");
    }

    #[test]
    fn test_render_unknown_placeholder_in_system_fails() {
        let style = make_style("{bogus}", "{commit_message}");
        let err = render(&style, &make_summary()).unwrap_err();
        let TemplateError::UnknownPlaceholder { name, location, .. } = err;
        assert_eq!(name, "bogus");
        assert_eq!(location, "system");
    }

    #[test]
    fn test_render_is_pure() {
        let style = make_style("{date}", "{files_changed}");
        let summary = make_summary();
        let first = render(&style, &summary).unwrap();
        let second = render(&style, &summary).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_substituted_values_are_not_rescanned() {
        let mut summary = make_summary();
        summary.message = "refs {author} literally".to_string();

        let style = make_style("sys", "{commit_message}");
        let rendered = render(&style, &summary).unwrap();
        assert_eq!(rendered.user, "refs {author} literally");
    }

    #[test]
    fn test_all_variables_substitute() {
        let template = RECOGNIZED_VARIABLES
            .iter()
            .map(|v| format!("{{{v}}}"))
            .collect::<Vec<_>>()
            .join("|");
        let style = make_style("sys", &template);
        let rendered = render(&style, &make_summary()).unwrap();
        assert!(!rendered.user.contains('{'));
        assert!(rendered.user.contains("0123456|"));
        assert!(rendered.user.contains("|10|2|1"));
    }

    #[test]
    fn test_validate_text_accepts_literal_text_without_placeholders() {
        assert!(validate_text("no placeholders here", "system").is_ok());
    }

    #[test]
    fn test_repeated_placeholder_substitutes_every_occurrence() {
        let style = make_style("sys", "{short_hash} and {short_hash}");
        let rendered = render(&style, &make_summary()).unwrap();
        assert_eq!(rendered.user, "0123456 and 0123456");
    }
}
