/// Merge caller-provided record fields with a log type's mandatory fields
///
/// Returns `None` when nothing was provided, so the destination keeps its
/// default field set. Otherwise the provided fields that are not mandatory
/// come first, in their original order, followed by the mandatory fields.
/// Duplicates are dropped (first occurrence wins) and an absent mandatory
/// list counts as empty.
///
/// # Example
///
/// ```
/// use mixinx_logs::compute_record_fields;
///
/// let provided = vec!["x".to_string(), "y".to_string(), "z".to_string()];
/// let mandatory = vec!["y".to_string()];
/// assert_eq!(
///     compute_record_fields(Some(provided.as_slice()), Some(mandatory.as_slice())),
///     Some(vec!["x".to_string(), "z".to_string(), "y".to_string()])
/// );
/// assert_eq!(compute_record_fields(None, Some(mandatory.as_slice())), None);
/// ```
pub fn compute_record_fields(
    provided: Option<&[String]>,
    mandatory: Option<&[String]>,
) -> Option<Vec<String>> {
    let provided = provided?;
    let mandatory = mandatory.unwrap_or_default();

    let mut merged: Vec<String> = Vec::with_capacity(provided.len() + mandatory.len());
    let optional = provided.iter().filter(|field| !mandatory.contains(*field));
    for field in optional.chain(mandatory) {
        if !merged.contains(field) {
            merged.push(field.clone());
        }
    }
    Some(merged)
}
