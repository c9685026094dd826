//! Splitting assistant output into prose and executable shell blocks.
//!
//! Both operations run over the same fence scanner, a small
//! outside-fence / inside-fence state machine: a fence opens at ``` plus
//! an optional word tag and a newline, and closes at the next ```. Both
//! functions are pure and can run in any order on the same input.

/// Language tags treated as executable shell. Case-sensitive, exact.
const SHELL_TAGS: [&str; 4] = ["bash", "sh", "shell", "zsh"];

/// One fenced region found in the text.
struct Fence<'a> {
    lang: &'a str,
    body: &'a str,
    /// Byte offset of the opening ```.
    start: usize,
    /// Byte offset just past the closing ```.
    end: usize,
}

/// Scan for fenced regions, left to right.
///
/// An opening fence is ``` followed by an optional alphanumeric/underscore
/// tag, optional spaces/tabs (and a stray `\r`), and a newline. Anything
/// else after ``` means it was not a fence. A fence with no closing ```
/// is not a fence either.
fn scan_fences(text: &str) -> Vec<Fence<'_>> {
    let bytes = text.as_bytes();
    let mut fences = Vec::new();
    let mut cursor = 0;

    while let Some(found) = text[cursor..].find("```") {
        let open = cursor + found;
        let tag_start = open + 3;
        let mut pos = tag_start;
        while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_') {
            pos += 1;
        }
        let tag_end = pos;
        while pos < bytes.len() && matches!(bytes[pos], b' ' | b'\t' | b'\r') {
            pos += 1;
        }
        if pos >= bytes.len() || bytes[pos] != b'\n' {
            cursor = open + 3;
            continue;
        }

        let body_start = pos + 1;
        let Some(close) = text[body_start..].find("```") else {
            break;
        };
        let close = body_start + close;
        fences.push(Fence {
            lang: &text[tag_start..tag_end],
            body: &text[body_start..close],
            start: open,
            end: close + 3,
        });
        cursor = close + 3;
    }

    fences
}

/// Remove every fenced code region, whatever its tag, collapsing each one
/// (plus one adjacent leading and trailing newline) to a single newline.
/// Surrounding prose is preserved byte-for-byte.
pub fn strip_code_blocks(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for fence in scan_fences(text) {
        let mut start = fence.start;
        if start > cursor && bytes[start - 1] == b'\n' {
            start -= 1;
        }
        let mut end = fence.end;
        if end < bytes.len() && bytes[end] == b'\n' {
            end += 1;
        }
        out.push_str(&text[cursor..start]);
        out.push('\n');
        cursor = end;
    }

    out.push_str(&text[cursor..]);
    out
}

/// Extract the shell commands the assistant proposed, in source order.
///
/// Only fences tagged with one of [`SHELL_TAGS`] count; other fences are
/// not commands. Bodies are trimmed, and blocks empty after trimming are
/// dropped.
pub fn parse_command_blocks(text: &str) -> Vec<String> {
    scan_fences(text)
        .into_iter()
        .filter(|fence| SHELL_TAGS.contains(&fence.lang))
        .map(|fence| fence.body.trim())
        .filter(|cmd| !cmd.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_fence_is_extracted_and_python_ignored() {
        let text = "Use ```bash\necho hi\n```\nand ```python\nprint(1)\n```";
        assert_eq!(parse_command_blocks(text), vec!["echo hi"]);
    }

    #[test]
    fn whitespace_only_block_is_discarded() {
        assert!(parse_command_blocks("```sh\n   \n```").is_empty());
    }

    #[test]
    fn all_shell_tags_are_recognized() {
        for tag in ["bash", "sh", "shell", "zsh"] {
            let text = format!("```{tag}\nuptime\n```");
            assert_eq!(parse_command_blocks(&text), vec!["uptime"], "tag {tag}");
        }
    }

    #[test]
    fn tag_matching_is_case_sensitive() {
        assert!(parse_command_blocks("```Bash\nuptime\n```").is_empty());
        assert!(parse_command_blocks("```BASH\nuptime\n```").is_empty());
    }

    #[test]
    fn blocks_come_out_in_source_order() {
        let text = "```sh\nfirst\n```\nmiddle\n```zsh\nsecond\n```\n```bash\nthird\n```";
        assert_eq!(parse_command_blocks(text), vec!["first", "second", "third"]);
    }

    #[test]
    fn multi_line_command_is_kept_whole() {
        let text = "```bash\ndf -h &&\n  du -sh ~\n```";
        assert_eq!(parse_command_blocks(text), vec!["df -h &&\n  du -sh ~"]);
    }

    #[test]
    fn strip_removes_every_fence_regardless_of_tag() {
        let text = "Before.\n```python\nprint(1)\n```\nAfter.";
        assert_eq!(strip_code_blocks(text), "Before.\nAfter.");
    }

    #[test]
    fn strip_collapses_each_fence_to_one_newline() {
        let text = "A\n```bash\nls\n```\nB\n```sh\npwd\n```\nC";
        assert_eq!(strip_code_blocks(text), "A\nB\nC");
    }

    #[test]
    fn strip_leaves_prose_without_fences_untouched() {
        let text = "Nothing `inline` here.\nJust prose.";
        assert_eq!(strip_code_blocks(text), text);
    }

    #[test]
    fn unterminated_fence_is_not_a_fence() {
        let text = "Look:\n```bash\necho hi";
        assert_eq!(strip_code_blocks(text), text);
        assert!(parse_command_blocks(text).is_empty());
    }

    #[test]
    fn backticks_without_newline_are_not_a_fence() {
        let text = "The ```bash marker inline stays.";
        assert_eq!(strip_code_blocks(text), text);
        assert!(parse_command_blocks(text).is_empty());
    }

    #[test]
    fn operations_are_independent_on_the_same_input() {
        let text = "Run:\n```bash\nuptime\n```\nDone.";
        let stripped = strip_code_blocks(text);
        let commands = parse_command_blocks(text);
        assert_eq!(stripped, "Run:\nDone.");
        assert_eq!(commands, vec!["uptime"]);
        // Same answers when called again, in the other order.
        assert_eq!(parse_command_blocks(text), commands);
        assert_eq!(strip_code_blocks(text), stripped);
    }

    #[test]
    fn crlf_after_tag_is_tolerated() {
        assert_eq!(parse_command_blocks("```bash\r\nuptime\n```"), vec!["uptime"]);
    }
}
