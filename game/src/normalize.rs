/// Canonicalizes source-code-like text for equivalence comparison only:
/// strips all whitespace, folds apostrophes and double quotes into one
/// canonical quote, lowercases the rest. Total and idempotent.
pub fn normalize_code(code: &str) -> String {
    let mut out = String::with_capacity(code.len());
    for c in code.chars() {
        if c.is_whitespace() {
            continue;
        }
        if c == '\'' || c == '"' {
            out.push('"');
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Missing input normalizes to the empty string, never an error. Two missing
/// values therefore compare equal, which is accepted behavior.
pub fn normalize_code_opt(code: Option<&str>) -> String {
    code.map(normalize_code).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_whitespace_and_folds_quotes_and_case() {
        assert_eq!(normalize_code("Let It = 'x'"), "letit=\"x\"");
        assert_eq!(normalize_code("letit=\"x\""), "letit=\"x\"");
    }

    #[test]
    fn whitespace_variants_compare_equal() {
        assert_eq!(
            normalize_code("let   x\t=\n'1';"),
            normalize_code("let x = \"1\";")
        );
    }

    #[test]
    fn missing_input_is_empty_not_an_error() {
        assert_eq!(normalize_code_opt(None), "");
        assert_eq!(normalize_code_opt(Some("")), "");
    }

    #[test]
    fn is_idempotent() {
        let samples = [
            "const sum = (a, b) => a + b;",
            "console.log('Hello, World!');",
            "  MIXED Case \"and' quotes ",
            "",
        ];
        for s in samples {
            let once = normalize_code(s);
            assert_eq!(normalize_code(&once), once);
        }
    }
}
