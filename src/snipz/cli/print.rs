use colored::{ColoredString, Colorize};
use snipz::category::CategoryRegistry;
use snipz::commands::{CmdMessage, MessageLevel};
use snipz::index::IndexedSnippet;
use snipz::mask::mask_sensitive_data;
use snipz::model::Snippet;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const LABEL_WIDTH: usize = 22;
const MARKDOWN_MARKER: &str = "md";
const TEMPLATE_MARKER: &str = "tpl";

pub(super) fn print_message(message: &CmdMessage) {
    match message.level {
        MessageLevel::Info => println!("{}", message.content.dimmed()),
        MessageLevel::Success => println!("{}", message.content.green()),
        MessageLevel::Warning => println!("{}", message.content.yellow()),
        MessageLevel::Error => eprintln!("{}", message.content.red()),
    }
}

/// One line per snippet: number, label, preview, flags.
pub(super) fn print_snippets(items: &[IndexedSnippet], categories: &CategoryRegistry, mask: bool) {
    if items.is_empty() {
        println!("No snippets found.");
        return;
    }

    let number_width = items
        .iter()
        .map(|i| i.display_number().to_string().len())
        .max()
        .unwrap_or(1);

    for item in items {
        let snippet = &item.snippet;
        let number = format!("{:>width$}. ", item.display_number(), width = number_width);

        let label = pad_to_width(&truncate_to_width(&snippet.label, LABEL_WIDTH), LABEL_WIDTH);
        let markers = markers(snippet);

        let preview = display_text(snippet.preview(), mask);
        let fixed = number.width() + LABEL_WIDTH + 1 + markers.width() + 1;
        let preview = truncate_to_width(&preview, LINE_WIDTH.saturating_sub(fixed));

        println!(
            "{}{} {} {}",
            number.yellow(),
            paint(&label, categories.color_for(&snippet.label)),
            preview,
            markers.dimmed()
        );
    }
}

pub(super) fn print_full_snippets(items: &[IndexedSnippet], categories: &CategoryRegistry, mask: bool) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        let snippet = &item.snippet;
        println!(
            "{} {} {}",
            format!("{}.", item.display_number()).yellow(),
            paint(&snippet.label, categories.color_for(&snippet.label)).bold(),
            snippet.id.to_string().dimmed()
        );
        if !snippet.tags.is_empty() {
            println!("{} {}", "Tags:".dimmed(), snippet.tags.join(", ").cyan());
        }
        let markers = markers(snippet);
        if !markers.is_empty() {
            println!("{}", markers.dimmed());
        }
        println!("--------------------------------");
        println!("{}", display_text(&snippet.text, mask));
    }
}

pub(super) fn print_categories(categories: &CategoryRegistry) {
    let width = categories.iter().map(|c| c.name.width()).max().unwrap_or(0);
    for category in categories.iter() {
        println!(
            "{}  {}",
            paint(&pad_to_width(&category.name, width), &category.color),
            category.color.dimmed()
        );
    }
}

pub(super) fn print_tags(tags: &[String]) {
    for tag in tags {
        println!("{}", tag.cyan());
    }
}

/// Plain listing of snippets that are not (yet) in the store, e.g. an import preview.
pub(super) fn print_plain_snippets(snippets: &[Snippet], mask: bool) {
    for (i, snippet) in snippets.iter().enumerate() {
        let preview = display_text(snippet.preview(), mask);
        println!("{}. {}", i + 1, truncate_to_width(&preview, LINE_WIDTH));
    }
}

fn display_text(text: &str, mask: bool) -> String {
    if mask {
        mask_sensitive_data(text)
    } else {
        text.to_string()
    }
}

fn markers(snippet: &Snippet) -> String {
    let mut markers = Vec::new();
    if snippet.is_markdown {
        markers.push(MARKDOWN_MARKER);
    }
    if snippet.is_template {
        markers.push(TEMPLATE_MARKER);
    }
    markers.join(" ")
}

/// Colors `text` with a `#rrggbb` color; anything unparsable leaves it plain.
fn paint(text: &str, color: &str) -> ColoredString {
    match parse_hex(color) {
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => text.normal(),
    }
}

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_by_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
    }

    #[test]
    fn parses_category_colors() {
        assert_eq!(parse_hex("#21759b"), Some((0x21, 0x75, 0x9b)));
        assert_eq!(parse_hex("#E1306C"), Some((0xe1, 0x30, 0x6c)));
        assert_eq!(parse_hex("blue"), None);
        assert_eq!(parse_hex("#12345"), None);
    }
}
