//! Prompt templates and inline image tags

/// Cover art for an article title
pub fn cover_image(title: &str) -> String {
    format!(
        "A professional, high-tech, abstract background for a cybersecurity blog article titled: \"{title}\". Dark theme, with accents of cyan and purple."
    )
}

/// Illustration for a `![gen-image: ...]` tag
pub fn inline_image(description: &str) -> String {
    format!(
        "A high-quality, realistic image for a cybersecurity blog article. The image should depict: \"{description}\". Digital art style, dark and moody, with highlights of cyan or neon."
    )
}

/// Reader question for the assistant
pub fn assistant(question: &str) -> String {
    format!(
        "You are a cybersecurity expert assistant for the DarkShield blog. Provide a concise and informative answer to the following user question. Use markdown for formatting. Question: \"{question}\""
    )
}

pub const SECURITY_REPORT: &str = "As the AI core for DarkShield, generate a weekly security report.
- Analyze fictional global threat vectors and recent (but plausible) vulnerabilities (e.g., CVE-2024-XXXXX).
- Correlate this with fictional traffic patterns and user queries on the DarkShield blog.
- Provide a concise summary and one actionable recommendation for the blog's content strategy.
- Format the output as a simple text-based report.";

const TAG_OPEN: &str = "![gen-image:";

/// A `![gen-image: prompt]` occurrence in article content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageTag<'a> {
    /// Byte range of the whole tag in the content
    pub start: usize,
    pub end: usize,
    /// Prompt with leading whitespace removed
    pub prompt: &'a str,
}

/// All image tags, in order of appearance
///
/// The prompt runs to the first `]` and may not span lines.
pub fn image_tags(content: &str) -> Vec<ImageTag<'_>> {
    let mut tags = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = content[cursor..].find(TAG_OPEN) {
        let start = cursor + offset;
        let body_start = start + TAG_OPEN.len();
        let body = &content[body_start..];

        match body.find([']', '\n']) {
            Some(close) if body.as_bytes()[close] == b']' => {
                let end = body_start + close + 1;
                tags.push(ImageTag {
                    start,
                    end,
                    prompt: body[..close].trim_start(),
                });
                cursor = end;
            }
            _ => cursor = body_start,
        }
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_tags() {
        let content = "Intro\n![gen-image:  a red firewall] middle ![gen-image:server room]\nend";
        let tags = image_tags(content);

        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].prompt, "a red firewall");
        assert_eq!(&content[tags[0].start..tags[0].end], "![gen-image:  a red firewall]");
        assert_eq!(tags[1].prompt, "server room");
    }

    #[test]
    fn test_unterminated_and_multiline_tags_are_ignored() {
        assert!(image_tags("![gen-image: broken\n] text").is_empty());
        assert!(image_tags("![gen-image: never closed").is_empty());
        assert!(image_tags("![alt](url)").is_empty());
    }

    #[test]
    fn test_empty_prompt_still_matches() {
        let tags = image_tags("![gen-image:]");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].prompt, "");
    }

    #[test]
    fn test_templates_quote_input() {
        assert!(cover_image("Zero Day").contains("titled: \"Zero Day\""));
        assert!(inline_image("a lock").contains("depict: \"a lock\""));
        assert!(assistant("What is XSS?").ends_with("Question: \"What is XSS?\""));
    }
}
