/// Overlays the typed characters onto `label`, position by position.
///
/// The result keeps the user's casing for what was typed and shows the rest
/// of the label as the ghost completion.
pub fn ghost_text(label: &str, typed: &str) -> String {
    let typed_len = typed.chars().count();
    typed.chars().chain(label.chars().skip(typed_len)).collect()
}

/// The part of the ghost text that extends past what was typed.
pub fn ghost_suffix<'a>(ghost: &'a str, typed: &str) -> Option<&'a str> {
    let typed_len = typed.chars().count();
    let (byte_idx, _) = ghost.char_indices().nth(typed_len)?;
    Some(&ghost[byte_idx..])
}
