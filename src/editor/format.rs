//! Cursor-relative Markdown insertion.
//!
//! Offsets are UTF-16 code units, the unit of `selectionStart`/`selectionEnd`
//! on a textarea.

use super::{byte_idx_to_utf16, utf16_to_byte_idx};

pub(crate) const TABLE_TEMPLATE: &str =
    "| Header 1 | Header 2 |\n| -------- | -------- |\n| Cell 1   | Cell 2   |\n";
pub(crate) const INDENT: &str = "  ";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Selection {
    pub start: u32,
    pub end: u32,
}

impl Selection {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn caret(at: u32) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Ordered, bounded by `content` and snapped back to character starts,
    /// so an offset inside a surrogate pair never shifts the result.
    fn normalized(self, content: &str) -> Self {
        let len = content.encode_utf16().count() as u32;
        let a = self.start.min(len);
        let b = self.end.min(len);
        let snap = |pos: u32| byte_idx_to_utf16(content, utf16_to_byte_idx(content, pos));
        Self {
            start: snap(a.min(b)),
            end: snap(a.max(b)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Edit {
    pub content: String,
    pub selection: Selection,
}

fn utf16_len(s: &str) -> u32 {
    s.encode_utf16().count() as u32
}

/// Surround the selection with `before`/`after`; the selection keeps covering
/// the original text.
pub(crate) fn wrap_text(content: &str, selection: Selection, before: &str, after: &str) -> Edit {
    let sel = selection.normalized(content);
    let start = utf16_to_byte_idx(content, sel.start);
    let end = utf16_to_byte_idx(content, sel.end);
    let selected = &content[start..end];

    let mut out = String::with_capacity(content.len() + before.len() + after.len());
    out.push_str(&content[..start]);
    out.push_str(before);
    out.push_str(selected);
    out.push_str(after);
    out.push_str(&content[end..]);

    let new_start = sel.start + utf16_len(before);
    Edit {
        content: out,
        selection: Selection::new(new_start, new_start + utf16_len(selected)),
    }
}

/// Insert `text` in front of the selection and shift the selection past it.
pub(crate) fn insert_text(content: &str, selection: Selection, text: &str) -> Edit {
    let sel = selection.normalized(content);
    let at = utf16_to_byte_idx(content, sel.start);

    let mut out = String::with_capacity(content.len() + text.len());
    out.push_str(&content[..at]);
    out.push_str(text);
    out.push_str(&content[at..]);

    let shift = utf16_len(text);
    Edit {
        content: out,
        selection: Selection::new(sel.start + shift, sel.end + shift),
    }
}

/// Prefix the line holding the selection start with `level` hashes.
pub(crate) fn format_heading(content: &str, selection: Selection, level: u8) -> Edit {
    let sel = selection.normalized(content);
    let start = utf16_to_byte_idx(content, sel.start);
    let line_start = content[..start].rfind('\n').map(|i| i + 1).unwrap_or(0);

    let prefix = format!("{} ", "#".repeat(level.clamp(1, 6) as usize));
    let mut out = String::with_capacity(content.len() + prefix.len());
    out.push_str(&content[..line_start]);
    out.push_str(&prefix);
    out.push_str(&content[line_start..]);

    let shift = utf16_len(&prefix);
    let line_start_utf16 = byte_idx_to_utf16(content, line_start);
    Edit {
        content: out,
        selection: Selection::new(line_start_utf16 + shift, sel.end + shift),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub(crate) enum FormatAction {
    Bold,
    Italic,
    #[strum(to_string = "Heading 1")]
    Heading1,
    #[strum(to_string = "Heading 2")]
    Heading2,
    #[strum(to_string = "Heading 3")]
    Heading3,
    #[strum(to_string = "Bullet list")]
    BulletList,
    #[strum(to_string = "Numbered list")]
    NumberedList,
    #[strum(to_string = "Task")]
    Checkbox,
    #[strum(to_string = "Inline code")]
    Code,
    #[strum(to_string = "Code block")]
    CodeBlock,
    Link,
    Image,
    Table,
    Quote,
    #[strum(to_string = "Horizontal rule")]
    HorizontalRule,
}

impl FormatAction {
    pub fn apply(self, content: &str, selection: Selection) -> Edit {
        match self {
            Self::Bold => wrap_text(content, selection, "**", "**"),
            Self::Italic => wrap_text(content, selection, "_", "_"),
            Self::Heading1 => format_heading(content, selection, 1),
            Self::Heading2 => format_heading(content, selection, 2),
            Self::Heading3 => format_heading(content, selection, 3),
            Self::BulletList => insert_text(content, selection, "- "),
            Self::NumberedList => insert_text(content, selection, "1. "),
            Self::Checkbox => insert_text(content, selection, "- [ ] "),
            Self::Code => wrap_text(content, selection, "`", "`"),
            Self::CodeBlock => wrap_text(content, selection, "```\n", "\n```"),
            Self::Link if !selection.is_empty() => wrap_text(content, selection, "[", "](url)"),
            Self::Link => insert_text(content, selection, "[text](url)"),
            Self::Image => insert_text(content, selection, "![alt text](image-url)"),
            Self::Table => insert_text(content, selection, TABLE_TEMPLATE),
            Self::Quote => insert_text(content, selection, "> "),
            Self::HorizontalRule => insert_text(content, selection, "\n---\n"),
        }
    }
}

/// Tab in the textarea indents instead of moving focus.
pub(crate) fn indent(content: &str, selection: Selection) -> Edit {
    insert_text(content, selection, INDENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_wraps_selection() {
        let e = FormatAction::Bold.apply("Initial content", Selection::new(8, 15));
        assert_eq!(e.content, "Initial **content**");
        assert_eq!(e.selection, Selection::new(10, 17));
    }

    #[test]
    fn test_offsets_inside_surrogate_pair_snap_to_char_start() {
        let e = wrap_text("😀", Selection::new(1, 2), "**", "**");
        assert_eq!(e.content, "**😀**");
        assert_eq!(e.selection, Selection::new(2, 4));

        let e = insert_text("a😀", Selection::caret(2), "-");
        assert_eq!(e.content, "a-😀");
        assert_eq!(e.selection, Selection::caret(2));
    }

    #[test]
    fn test_link_without_selection_inserts_template() {
        let e = FormatAction::Link.apply("Initial content", Selection::caret(8));
        assert_eq!(e.content, "Initial [text](url)content");
        assert_eq!(e.selection, Selection::caret(19));
    }

    #[test]
    fn test_link_with_selection_wraps() {
        let e = FormatAction::Link.apply("see docs", Selection::new(4, 8));
        assert_eq!(e.content, "see [docs](url)");
        assert_eq!(e.selection, Selection::new(5, 9));
    }

    #[test]
    fn test_empty_wrap_places_caret_between_markers() {
        let e = FormatAction::Italic.apply("", Selection::caret(0));
        assert_eq!(e.content, "__");
        assert_eq!(e.selection, Selection::caret(1));

        let e = FormatAction::CodeBlock.apply("x", Selection::caret(1));
        assert_eq!(e.content, "x```\n\n```");
        assert_eq!(e.selection, Selection::caret(5));
    }

    #[test]
    fn test_heading_prefixes_current_line() {
        let e = FormatAction::Heading2.apply("first\nsecond line", Selection::new(9, 12));
        assert_eq!(e.content, "first\n## second line");
        assert_eq!(e.selection, Selection::new(9, 15));

        let e = FormatAction::Heading1.apply("title", Selection::caret(0));
        assert_eq!(e.content, "# title");
        assert_eq!(e.selection, Selection::caret(2));
    }

    #[test]
    fn test_insert_actions_shift_selection() {
        let e = FormatAction::Checkbox.apply("todo", Selection::new(0, 4));
        assert_eq!(e.content, "- [ ] todo");
        assert_eq!(e.selection, Selection::new(6, 10));

        let e = FormatAction::HorizontalRule.apply("ab", Selection::caret(1));
        assert_eq!(e.content, "a\n---\nb");
        assert_eq!(e.selection, Selection::caret(6));

        let e = FormatAction::Table.apply("", Selection::caret(0));
        assert_eq!(e.content, TABLE_TEMPLATE);
    }

    #[test]
    fn test_indent_inserts_two_spaces() {
        let e = indent("- item", Selection::caret(0));
        assert_eq!(e.content, "  - item");
        assert_eq!(e.selection, Selection::caret(2));
    }

    #[test]
    fn test_offsets_are_clamped_and_ordered() {
        let e = FormatAction::Bold.apply("abc", Selection::new(99, 1));
        assert_eq!(e.content, "a**bc**");
        assert_eq!(e.selection, Selection::new(3, 5));
    }

    #[test]
    fn test_offsets_count_utf16_units() {
        // "é" is one unit, the emoji is two.
        let content = "é😀 word";
        let e = FormatAction::Bold.apply(content, Selection::new(4, 8));
        assert_eq!(e.content, "é😀 **word**");
        assert_eq!(e.selection, Selection::new(6, 10));
    }
}
