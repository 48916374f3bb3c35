/// Category of a single input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'s> {
    /// Blank, `'` comment or `@` directive.
    Skip,
    /// A lone `}`.
    ScopeClose,
    /// Anything else, trimmed.
    Content(&'s str),
}

pub fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('@') || trimmed.starts_with('\'') {
        Line::Skip
    } else if trimmed == "}" {
        Line::ScopeClose
    } else {
        Line::Content(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(classify(""), Line::Skip);
        assert_eq!(classify("   \t "), Line::Skip);
    }

    #[test]
    fn directives_and_comments_are_skipped() {
        assert_eq!(classify("@startuml"), Line::Skip);
        assert_eq!(classify("   @enduml"), Line::Skip);
        assert_eq!(classify("' a comment"), Line::Skip);
        assert_eq!(classify("\t'class Hidden {"), Line::Skip);
    }

    #[test]
    fn lone_brace_closes_scope() {
        assert_eq!(classify("}"), Line::ScopeClose);
        assert_eq!(classify("    }  "), Line::ScopeClose);
    }

    #[test]
    fn brace_with_trailing_text_is_content() {
        assert_eq!(classify("} extra"), Line::Content("} extra"));
        assert_eq!(classify("}}"), Line::Content("}}"));
    }

    #[test]
    fn content_is_trimmed() {
        assert_eq!(classify("   name : string  "), Line::Content("name : string"));
    }

    #[test]
    fn markers_only_count_at_line_start() {
        assert_eq!(classify("A -- B : it's"), Line::Content("A -- B : it's"));
        assert_eq!(classify("mail @ home"), Line::Content("mail @ home"));
    }
}
