/// Case-insensitive substring or in-order subsequence match.
///
/// An empty query matches everything. `"abc"` matches `"xaxbxc"` but not
/// `"acb"`.
pub fn fuzzy_search(query: &str, text: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let query = query.to_lowercase();
    let text = text.to_lowercase();
    if text.contains(&query) {
        return true;
    }

    let mut pending = query.chars().peekable();
    for ch in text.chars() {
        match pending.peek() {
            Some(&next) if next == ch => {
                pending.next();
            }
            Some(_) => {}
            None => break,
        }
    }
    pending.peek().is_none()
}
