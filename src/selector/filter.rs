//! Case-insensitive substring filtering over static option lists.

/// Returns the entries of `options` containing `query` (case-insensitive), in list order.
///
/// An empty query matches nothing, so an untouched field never opens a dropdown
/// listing every option. Duplicates in `options` are passed through as-is.
pub fn filter_options<'a, S>(query: &str, options: &'a [S]) -> Vec<&'a str>
where
    S: AsRef<str>,
{
    if query.is_empty() {
        return Vec::new();
    }
    let query_lower = query.to_lowercase();

    options
        .iter()
        .map(AsRef::as_ref)
        .filter(|option| option.to_lowercase().contains(&query_lower))
        .collect()
}
