// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned replies for questions nothing in the corpus answers.

use autodidact_core::Language;

/// A keyword group and its reply in each language.
struct ReplyGroup {
    keywords: &'static [&'static str],
    english: &'static str,
    tagalog: &'static str,
}

/// Checked in order; the first group with a matching keyword wins.
const GROUPS: &[ReplyGroup] = &[
    ReplyGroup {
        keywords: &["lua", "script", "function", "variable", "table", "loop"],
        english: "I don't know that yet, but you can teach me! I'm learning about Lua scripting.",
        tagalog: "Hindi ko pa yan alam, pero turuan mo ako! Nag-aaral ako tungkol sa Lua scripting.",
    },
    ReplyGroup {
        keywords: &["gui", "frame", "button", "udim2", "screengui", "textbox"],
        english: "I haven't learned about that specific GUI topic yet. Can you teach me?",
        tagalog: "Hindi ko pa yan natutuhan tungkol sa GUI. Pwede mo ba akong turuan?",
    },
    ReplyGroup {
        keywords: &["executor", "loadstring", "getgenv", "script hub"],
        english: "I'm still learning about executors. You can teach me about this topic!",
        tagalog: "Nag-aaral pa ako tungkol sa executors. Pwede mo akong turuan!",
    },
];

const DEFAULT_ENGLISH: &str = "I'm still learning! Teach me with the teach command.";
const DEFAULT_TAGALOG: &str = "Nag-aaral pa ako! Turuan mo ako gamit ang teach command.";

/// Pick the canned reply for `question` in `language`.
///
/// Single keywords match whole tokens; multi-word keywords match a run of
/// consecutive tokens.
pub fn canned_reply(question: &str, language: Language) -> &'static str {
    let tokens: Vec<String> = question
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect();
    let joined = format!(" {} ", tokens.join(" "));

    let hit = |keyword: &str| {
        if keyword.contains(' ') {
            joined.contains(&format!(" {keyword} "))
        } else {
            tokens.iter().any(|t| t == keyword)
        }
    };

    let (english, tagalog) = GROUPS
        .iter()
        .find(|group| group.keywords.iter().any(|k| hit(k)))
        .map(|group| (group.english, group.tagalog))
        .unwrap_or((DEFAULT_ENGLISH, DEFAULT_TAGALOG));

    match language {
        Language::En => english,
        Language::Tl => tagalog,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lua_group_matches_token_with_punctuation() {
        let reply = canned_reply("how does a repeat loop?", Language::En);
        assert!(reply.contains("Lua scripting"));
    }

    #[test]
    fn gui_group_in_tagalog() {
        let reply = canned_reply("ano ang ScreenGui", Language::Tl);
        assert!(reply.contains("GUI"));
        assert!(reply.starts_with("Hindi"));
    }

    #[test]
    fn multiword_executor_keyword() {
        let reply = canned_reply("best script hub?", Language::En);
        // "script" belongs to the earlier Lua group
        assert!(reply.contains("Lua scripting"));

        let reply = canned_reply("where is the hub of scripts", Language::En);
        assert!(reply.starts_with("I'm still learning!"));

        let reply = canned_reply("getgenv usage", Language::En);
        assert!(reply.contains("executors"));
    }

    #[test]
    fn default_reply_per_language() {
        assert!(canned_reply("weather today", Language::En).starts_with("I'm still learning!"));
        assert!(canned_reply("magandang gabi", Language::Tl).starts_with("Nag-aaral pa ako!"));
    }
}
