//! Pure text transforms applied to each file's content.
//!
//! Cleaning is a single pass: blank-line runs are collapsed first, then debug
//! calls are removed. A line emptied by the removal step stays behind as a
//! blank line; it is not collapsed again.

/// Text cleaner bound to one debug call name (e.g. `console.log`).
#[derive(Debug, Clone)]
pub struct TextCleaner {
    call_prefix: String,
}

impl TextCleaner {
    pub fn new(debug_call: &str) -> Self {
        TextCleaner {
            call_prefix: format!("{debug_call}("),
        }
    }

    /// Run both steps, in order.
    pub fn clean(&self, content: &str) -> String {
        let collapsed = collapse_blank_lines(content);
        strip_debug_calls(&collapsed, &self.call_prefix)
    }
}

/// Replace every run of two or more `\n` with a single `\n`.
pub fn collapse_blank_lines(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut prev_newline = false;

    for ch in content.chars() {
        if ch == '\n' {
            if prev_newline {
                continue;
            }
            prev_newline = true;
        } else {
            prev_newline = false;
        }
        out.push(ch);
    }

    out
}

/// Remove every `<call_prefix>...)` with an optional trailing `;`.
///
/// Arguments run up to the first `)` on the same line. Calls whose arguments
/// span several lines are left untouched, and nested parentheses are not
/// balanced: `console.log(f(x));` keeps its trailing `);`.
pub fn strip_debug_calls(content: &str, call_prefix: &str) -> String {
    if call_prefix.is_empty() || !content.contains(call_prefix) {
        return content.to_string();
    }

    let mut out = String::with_capacity(content.len());
    for line in content.split_inclusive('\n') {
        strip_line(line, call_prefix, &mut out);
    }
    out
}

fn strip_line(line: &str, call_prefix: &str, out: &mut String) {
    let mut rest = line;

    while let Some(start) = rest.find(call_prefix) {
        let args = &rest[start + call_prefix.len()..];
        // No closing paren on this line: nothing further can match either
        let Some(close) = args.find(')') else {
            break;
        };

        out.push_str(&rest[..start]);
        let tail = &args[close + 1..];
        rest = tail.strip_prefix(';').unwrap_or(tail);
    }

    out.push_str(rest);
}
