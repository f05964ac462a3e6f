//! Parser for the lesson-markup dialect the content provider emits.
//!
//! The dialect is deliberately small: `#`/`##`/`###` headings, `- ` bullet
//! items, triple-backtick fenced code blocks with an optional language tag,
//! and everything else as plain paragraphs. Parsing into blocks keeps the
//! renderer out of the string-splitting business.

/// One structural block of a lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Bullet(String),
    Code { language: Option<String>, code: String },
    Paragraph(String),
}

/// Parse lesson text into blocks.
///
/// Blank lines separate blocks and produce nothing themselves. An
/// unterminated code fence swallows the rest of the input as code.
#[must_use]
pub fn parse(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut fence: Option<(Option<String>, Vec<String>)> = None;

    for line in text.lines() {
        if let Some((language, lines)) = fence.as_mut() {
            if line.trim_end() == "```" {
                blocks.push(Block::Code {
                    language: language.take(),
                    code: lines.join("\n"),
                });
                fence = None;
            } else {
                lines.push(line.to_owned());
            }
            continue;
        }

        let trimmed = line.trim();
        if let Some(tag) = trimmed.strip_prefix("```") {
            let language = Some(tag.trim().to_owned()).filter(|tag| !tag.is_empty());
            fence = Some((language, Vec::new()));
        } else if let Some(text) = trimmed.strip_prefix("### ") {
            blocks.push(Block::Heading {
                level: 3,
                text: text.to_owned(),
            });
        } else if let Some(text) = trimmed.strip_prefix("## ") {
            blocks.push(Block::Heading {
                level: 2,
                text: text.to_owned(),
            });
        } else if let Some(text) = trimmed.strip_prefix("# ") {
            blocks.push(Block::Heading {
                level: 1,
                text: text.to_owned(),
            });
        } else if let Some(text) = trimmed.strip_prefix("- ") {
            blocks.push(Block::Bullet(text.to_owned()));
        } else if !trimmed.is_empty() {
            blocks.push(Block::Paragraph(trimmed.to_owned()));
        }
    }

    if let Some((language, lines)) = fence {
        blocks.push(Block::Code {
            language,
            code: lines.join("\n"),
        });
    }

    blocks
}
