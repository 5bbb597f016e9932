//! crates/logging/src/format.rs
//! Joins message arguments into a single line.

use std::fmt::Write as _;

use logging_sink::Value;

/// Renders `args` with [`Display`](std::fmt::Display) and joins them with one space.
///
/// An empty slice yields the empty string. Joining adds no line terminator of
/// its own, so a newline the caller put at the end of the last argument is
/// kept as given. Rendering never fails.
///
/// # Examples
///
/// ```
/// use logging::{Value, format_message};
///
/// assert_eq!(format_message(&[]), "");
/// assert_eq!(format_message(&[Value::from("a"), Value::from("b")]), "a b");
/// assert_eq!(
///     format_message(&[Value::from(1), Value::from(2.5), Value::from("x")]),
///     "1 2.5 x"
/// );
/// ```
#[must_use]
pub fn format_message(args: &[Value]) -> String {
    let mut message = String::new();
    for (index, arg) in args.iter().enumerate() {
        if index > 0 {
            message.push(' ');
        }
        let _ = write!(message, "{arg}");
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io;

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(format_message(&[]), "");
    }

    #[test]
    fn single_argument_is_rendered_verbatim() {
        assert_eq!(format_message(&[Value::from("only")]), "only");
    }

    #[test]
    fn mixed_arguments_are_space_joined() {
        let args = [
            Value::from("Mixed"),
            Value::from("string"),
            Value::from(123),
            Value::error(&io::Error::other("error")),
        ];
        assert_eq!(format_message(&args), "Mixed string 123 error");
    }

    #[test]
    fn composites_render_with_their_default_form() {
        let args = [
            Value::from(vec!["admin", "user"]),
            Value::from(true),
            Value::Null,
        ];
        assert_eq!(format_message(&args), "[admin user] true null");
    }

    #[test]
    fn caller_supplied_newline_survives() {
        assert_eq!(format_message(&[Value::from("line\n")]), "line\n");
        assert_eq!(
            format_message(&[Value::from("a"), Value::from("b\n")]),
            "a b\n"
        );
    }

    #[test]
    fn empty_strings_still_take_a_separator() {
        assert_eq!(
            format_message(&[Value::from(""), Value::from("")]),
            " "
        );
    }

    proptest! {
        #[test]
        fn joined_length_matches_parts(parts in proptest::collection::vec("[a-z0-9 ]{0,8}", 0..8)) {
            let args: Vec<Value> = parts.iter().cloned().map(Value::from).collect();
            let message = format_message(&args);
            let expected = parts.iter().map(String::len).sum::<usize>() + parts.len().saturating_sub(1);
            prop_assert_eq!(message.len(), expected);
            prop_assert_eq!(message, parts.join(" "));
        }
    }
}
