pub(crate) const BODY_BLANK_MESSAGE: &str = "Body can't be blank";

/// Collects the full messages for everything wrong with a comment body.
///
/// Blank means empty or whitespace only. Length is counted in UTF-16 code units.
pub fn comment_body_errors(body: &str, max_length: usize) -> Vec<String> {
  let mut errors = vec![];
  if body.trim().is_empty() {
    errors.push(BODY_BLANK_MESSAGE.to_string());
  }
  if body.encode_utf16().count() > max_length {
    errors.push(format!(
      "Body is too long (maximum is {max_length} characters)"
    ));
  }
  errors
}

/// Joins messages the way they are shown to people: `a`, `a and b`, `a, b, and c`.
pub fn to_sentence(messages: &[String]) -> String {
  match messages {
    [] => String::new(),
    [one] => one.clone(),
    [first, second] => format!("{first} and {second}"),
    [init @ .., last] => format!("{}, and {last}", init.join(", ")),
  }
}
