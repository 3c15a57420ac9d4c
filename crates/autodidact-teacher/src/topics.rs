// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Teacher topics and the per-worker cursor that walks them.

use std::sync::Arc;

use autodidact_config::model::{TeacherConfig, TopicOrder};
use rand::seq::SliceRandom;

/// A question a teacher worker asks its provider, and where the answer is filed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub question: String,
    pub category: String,
}

impl Topic {
    pub fn new(question: &str, category: &str) -> Self {
        Self {
            question: question.to_string(),
            category: category.to_string(),
        }
    }
}

const BUILTIN: &[(&str, &str)] = &[
    ("what is a for loop in lua", "lua_basics"),
    ("what is a while loop in lua", "lua_basics"),
    ("what is a repeat until loop in lua", "lua_basics"),
    ("how do if statements work in lua", "lua_basics"),
    ("what is string concatenation in lua", "lua_basics"),
    ("how do i use pairs and ipairs in lua", "lua_basics"),
    ("what is a metatable in lua", "lua_basics"),
    ("what is pcall in lua", "lua_basics"),
    ("how do i insert into a table in lua", "lua_basics"),
    ("what is a coroutine in lua", "lua_basics"),
    ("what is a modulescript in roblox", "roblox_scripting"),
    ("what is a remotefunction in roblox", "roblox_scripting"),
    ("how do i use tweenservice in roblox", "roblox_scripting"),
    ("how do i save data with datastoreservice", "roblox_scripting"),
    ("how do i detect when a player joins in roblox", "roblox_scripting"),
    ("what is humanoid in roblox", "roblox_scripting"),
    ("how do i use raycasting in roblox", "roblox_scripting"),
    ("what is the touched event in roblox", "roblox_scripting"),
    ("how do i use task.wait in roblox", "roblox_scripting"),
    ("how do i make a leaderboard in roblox", "roblox_scripting"),
    ("how do i clone an object in roblox", "roblox_scripting"),
    ("what is runservice heartbeat in roblox", "roblox_scripting"),
    ("how do i make a textlabel in roblox", "gui"),
    ("how do i make a draggable frame in roblox", "gui"),
    ("what is uilistlayout in roblox", "gui"),
    ("how do i use a textbox in roblox", "gui"),
    ("how do i make a gui open and close in roblox", "gui"),
    ("what is zindex in roblox gui", "gui"),
    ("what is getrawmetatable", "executor"),
    ("what is hookfunction", "executor"),
];

/// The built-in Roblox/Lua topic list.
pub fn builtin_topics() -> Vec<Topic> {
    BUILTIN
        .iter()
        .map(|(question, category)| Topic::new(question, category))
        .collect()
}

/// Configured topics, or the built-in list when none are configured.
pub fn topics_from_config(config: &TeacherConfig) -> Vec<Topic> {
    if config.topics.is_empty() {
        builtin_topics()
    } else {
        config
            .topics
            .iter()
            .map(|t| Topic::new(&t.question, &t.category))
            .collect()
    }
}

/// Walks a topic list forever, one pass at a time.
///
/// Sequential cursors start at a per-worker offset so workers spread out;
/// shuffled cursors draw a fresh permutation for every pass. Either way
/// every topic comes up once per pass.
#[derive(Debug)]
pub struct TopicCursor {
    topics: Arc<Vec<Topic>>,
    order: TopicOrder,
    pass: Vec<usize>,
    next: usize,
}

impl TopicCursor {
    pub fn new(topics: Arc<Vec<Topic>>, order: TopicOrder, offset: usize) -> Self {
        let len = topics.len();
        let mut cursor = Self {
            topics,
            order,
            pass: Vec::with_capacity(len),
            next: 0,
        };
        cursor.start_pass(offset);
        cursor
    }

    fn start_pass(&mut self, offset: usize) {
        let len = self.topics.len();
        self.pass = (0..len).collect();
        match self.order {
            TopicOrder::Sequential if len > 0 => self.pass.rotate_left(offset % len),
            TopicOrder::Sequential => {}
            TopicOrder::Shuffled => self.pass.shuffle(&mut rand::thread_rng()),
        }
        self.next = 0;
    }

    /// The next topic, or `None` if the list is empty.
    pub fn next_topic(&mut self) -> Option<&Topic> {
        if self.topics.is_empty() {
            return None;
        }
        if self.next >= self.pass.len() {
            self.start_pass(0);
        }
        let idx = self.pass[self.next];
        self.next += 1;
        self.topics.get(idx)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use autodidact_config::model::TopicConfig;

    use super::*;

    fn three() -> Arc<Vec<Topic>> {
        Arc::new(vec![
            Topic::new("a", "x"),
            Topic::new("b", "x"),
            Topic::new("c", "x"),
        ])
    }

    #[test]
    fn builtin_topics_are_unique() {
        let topics = builtin_topics();
        let unique: HashSet<&str> = topics.iter().map(|t| t.question.as_str()).collect();
        assert_eq!(unique.len(), topics.len());
    }

    #[test]
    fn configured_topics_replace_builtin() {
        let config = TeacherConfig {
            topics: vec![TopicConfig {
                question: "what is a bindableevent".into(),
                category: "roblox_scripting".into(),
            }],
            ..TeacherConfig::default()
        };
        assert_eq!(
            topics_from_config(&config),
            vec![Topic::new("what is a bindableevent", "roblox_scripting")]
        );
        assert_eq!(
            topics_from_config(&TeacherConfig::default()).len(),
            BUILTIN.len()
        );
    }

    #[test]
    fn sequential_cursor_wraps_from_offset() {
        let mut cursor = TopicCursor::new(three(), TopicOrder::Sequential, 1);
        let seen: Vec<String> = (0..5)
            .map(|_| cursor.next_topic().unwrap().question.clone())
            .collect();
        assert_eq!(seen, vec!["b", "c", "a", "a", "b"]);
    }

    #[test]
    fn shuffled_cursor_covers_every_topic_each_pass() {
        let mut cursor = TopicCursor::new(three(), TopicOrder::Shuffled, 0);
        for _ in 0..4 {
            let pass: HashSet<String> = (0..3)
                .map(|_| cursor.next_topic().unwrap().question.clone())
                .collect();
            assert_eq!(pass.len(), 3);
        }
    }

    #[test]
    fn empty_list_yields_nothing() {
        let mut cursor = TopicCursor::new(Arc::new(Vec::new()), TopicOrder::Shuffled, 0);
        assert!(cursor.next_topic().is_none());
    }
}
