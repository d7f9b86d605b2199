use crate::model::Member;

/// Members whose name contains `query`, ignoring case, in their original order.
///
/// An empty query keeps everyone.
#[must_use]
pub fn filter(members: &[Member], query: &str) -> Vec<Member> {
    if query.is_empty() {
        return members.to_vec();
    }
    let needle = query.to_lowercase();
    members.iter().filter(|m| m.name.to_lowercase().contains(&needle)).cloned().collect()
}
