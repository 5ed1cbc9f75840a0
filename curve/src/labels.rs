use uuid::Uuid;

use crate::error::CurveError;
use crate::types::Label;

/// Add a label named `name`, drawing ids from `next_id` until one is unused.
pub fn create_label<'a, F>(
    labels: &'a mut Vec<Label>,
    name: &str,
    mut next_id: F,
) -> Result<&'a Label, CurveError>
where
    F: FnMut() -> String,
{
    let name = name.trim();
    if name.is_empty() {
        return Err(CurveError::EmptyLabelName);
    }
    if find_label_by_name(labels, name).is_some() {
        return Err(CurveError::DuplicateLabel(name.to_string()));
    }
    let id = loop {
        let candidate = next_id();
        if find_label(labels, &candidate).is_none() {
            break candidate;
        }
    };
    labels.push(Label {
        id,
        name: name.to_string(),
    });
    let idx = labels.len() - 1;
    Ok(&labels[idx])
}

pub fn new_label_id() -> String {
    Uuid::new_v4().to_string()
}

/// Drop a label. Records that reference it are left alone.
pub fn remove_label(labels: &mut Vec<Label>, id: &str) -> Option<Label> {
    let idx = labels.iter().position(|l| l.id == id)?;
    Some(labels.remove(idx))
}

pub fn find_label<'a>(labels: &'a [Label], id: &str) -> Option<&'a Label> {
    labels.iter().find(|l| l.id == id)
}

pub fn find_label_by_name<'a>(labels: &'a [Label], name: &str) -> Option<&'a Label> {
    labels.iter().find(|l| l.name == name)
}

/// Resolve user input that may be either a label id or a label name.
pub fn resolve_label<'a>(labels: &'a [Label], key: &str) -> Result<&'a Label, CurveError> {
    find_label(labels, key)
        .or_else(|| find_label_by_name(labels, key.trim()))
        .ok_or_else(|| CurveError::UnknownLabel(key.to_string()))
}
