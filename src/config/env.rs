//! `${NAME}` expansion for config values.

/// Expand every `${NAME}` in `input` using `lookup`.
///
/// Returns the name of the first variable `lookup` cannot resolve. A `${`
/// without a closing brace is kept as literal text.
pub fn interpolate<F>(input: &str, lookup: F) -> Result<String, String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            break;
        };

        out.push_str(&rest[..start]);
        let name = &after[..end];
        match lookup(name) {
            Some(value) => out.push_str(&value),
            None => return Err(name.to_string()),
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Expand using the process environment.
pub fn interpolate_env(input: &str) -> Result<String, String> {
    interpolate(input, |name| {
        std::env::var(name).ok().filter(|value| !value.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "PROJECT_ID" => Some("abc123".to_string()),
            "KEY" => Some("ff".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_expands_single_variable() {
        let url = interpolate("https://rinkeby.infura.io/v3/${PROJECT_ID}", lookup).unwrap();
        assert_eq!(url, "https://rinkeby.infura.io/v3/abc123");
    }

    #[test]
    fn test_expands_multiple_variables() {
        let value = interpolate("0x${KEY}${KEY}-${PROJECT_ID}", lookup).unwrap();
        assert_eq!(value, "0xffff-abc123");
    }

    #[test]
    fn test_missing_variable_is_reported() {
        let err = interpolate("0x${PRIVATE_KEY}", lookup).unwrap_err();
        assert_eq!(err, "PRIVATE_KEY");
    }

    #[test]
    fn test_unterminated_placeholder_is_literal() {
        let value = interpolate("http://host/${PROJECT_ID", lookup).unwrap();
        assert_eq!(value, "http://host/${PROJECT_ID");
    }

    #[test]
    fn test_plain_string_untouched() {
        assert_eq!(interpolate("http://127.0.0.1:8545", lookup).unwrap(), "http://127.0.0.1:8545");
    }
}
