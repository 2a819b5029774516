//! Built-in styles and platforms, written out by `config init`.

use std::collections::BTreeMap;

use crate::post::platform::PlatformSpec;
use crate::prompt::style::PromptStyle;

use super::library::StyleLibrary;

/// The library shipped with buildpost: three styles, four platforms.
pub fn default_library() -> StyleLibrary {
    let mut styles = BTreeMap::new();

    styles.insert(
        "casual".to_string(),
        style(
            "Casual",
            "Friendly, first-person progress update",
            "You are a developer sharing progress on social media. Write in a \
             friendly, conversational first-person voice. Output only the post \
             text, with no preamble, no quotation marks, and no hashtags.",
            "Write a casual social media post about this commit.\n\
             \n\
             Commit: {commit_message}\n\
             \n\
             Changed files:\n\
             {files_changed}\n\
             \n\
             Keep it short and enthusiastic without overselling the change.",
        ),
    );

    styles.insert(
        "professional".to_string(),
        style(
            "Professional",
            "Concise update for a professional audience",
            "You are a software engineer writing a concise, professional update \
             for a technical audience. Plain language, no emoji. Output only \
             the post text.",
            "Write a professional update about this change.\n\
             \n\
             Commit {short_hash} by {author} on {date}:\n\
             {commit_message}\n\
             \n\
             {files_count} files changed (+{insertions}/-{deletions}):\n\
             {diff_summary}\n\
             \n\
             Focus on the impact of the change, not the mechanics.",
        ),
    );

    styles.insert(
        "technical".to_string(),
        style(
            "Technical",
            "Precise post for a developer audience",
            "You are a developer writing for other developers. Be precise and \
             concrete; name the key files or subsystems touched. Output only \
             the post text.",
            "Write a technical post about this commit for a developer audience.\n\
             \n\
             Message: {commit_message}\n\
             \n\
             Diff digest:\n\
             {diff_summary}\n\
             \n\
             Total: +{insertions}/-{deletions} across {files_count} files.",
        ),
    );

    let mut platforms = BTreeMap::new();

    platforms.insert(
        "twitter".to_string(),
        platform(
            "Twitter/X",
            280,
            &["Short, punchy sentences", "One idea per post"],
            &["#BuildInPublic", "#coding"],
        ),
    );

    platforms.insert(
        "linkedin".to_string(),
        platform(
            "LinkedIn",
            3000,
            &[
                "Open with a hook line",
                "Blank lines between paragraphs",
                "Professional but personal tone",
            ],
            &["#SoftwareEngineering", "#BuildInPublic"],
        ),
    );

    platforms.insert(
        "mastodon".to_string(),
        platform(
            "Mastodon",
            500,
            &["Conversational tone lands best"],
            &["#FediDev", "#coding"],
        ),
    );

    platforms.insert(
        "devto".to_string(),
        platform(
            "Dev.to",
            1000,
            &["Write like a short journal entry", "Lowercase tags"],
            &["#devjournal", "#programming"],
        ),
    );

    StyleLibrary::from_parts(styles, platforms)
}

fn style(name: &str, description: &str, system: &str, template: &str) -> PromptStyle {
    PromptStyle {
        key: String::new(),
        name: name.to_string(),
        description: description.to_string(),
        system: system.to_string(),
        template: template.to_string(),
    }
}

fn platform(name: &str, max_length: usize, guidelines: &[&str], hashtags: &[&str]) -> PlatformSpec {
    PlatformSpec {
        key: String::new(),
        name: name.to_string(),
        max_length,
        guidelines: guidelines.iter().map(|s| s.to_string()).collect(),
        default_hashtags: hashtags.iter().map(|s| s.to_string()).collect(),
    }
}
