//! Prompt text sent to generative word sources.

/// Build the lexicon prompt for `count` words about `topic`.
pub fn lexicon_prompt(topic: &str, count: usize) -> String {
    format!(
        "You're Lexicon Finder. For the topic '{topic}', extract and list exactly {count} vocabulary words.
Requirements:
1. Each word must be uncommon - beyond the most common 7000 words but within the most common 30000 words in English
2. Words should be verifiable using Google Ngram Viewer frequency data
3. Avoid rare idioms or phrases
4. All words must be directly related to {topic}
5. Include a mix of:
   - Technical terms specific to {topic}
   - Related verbs
   - Related adjectives
   - Related nouns

Format: Return ONLY a comma-separated list of words, with no additional text or explanations."
    )
}
