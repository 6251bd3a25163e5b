use serde::{Deserialize, Serialize};

/// One node of the committee org chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CommitteeMember {
    pub id: String,
    pub name: String,
    /// Title within the committee, e.g. "President".
    pub role: String,
    pub contact: String,
    pub avatar: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[cfg_attr(feature = "openapi", schema(no_recursion))]
    pub children: Vec<CommitteeMember>,
}

impl CommitteeMember {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of members in this subtree, including `self`.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Self::size).sum::<usize>()
    }
}

/// Depth-first, parent before children, paired with the nesting level.
pub fn flatten(roots: &[CommitteeMember]) -> Vec<(usize, &CommitteeMember)> {
    fn walk<'a>(m: &'a CommitteeMember, level: usize, out: &mut Vec<(usize, &'a CommitteeMember)>) {
        out.push((level, m));
        for child in &m.children {
            walk(child, level + 1, out);
        }
    }
    let mut out = Vec::new();
    for root in roots {
        walk(root, 0, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn member(id: &str, role: &str, children: Vec<CommitteeMember>) -> CommitteeMember {
        CommitteeMember {
            id: id.into(),
            name: id.into(),
            role: role.into(),
            contact: String::new(),
            avatar: String::new(),
            children,
        }
    }

    #[test]
    fn flatten_walks_depth_first() {
        let tree = vec![member(
            "cm-1",
            "President",
            vec![
                member(
                    "user-2",
                    "Secretary",
                    vec![
                        member("cm-4", "Committee Member", vec![]),
                        member("cm-5", "Committee Member", vec![]),
                    ],
                ),
                member("user-3", "Treasurer", vec![]),
            ],
        )];
        let order: Vec<(usize, &str)> = flatten(&tree)
            .into_iter()
            .map(|(lvl, m)| (lvl, m.id.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![(0, "cm-1"), (1, "user-2"), (2, "cm-4"), (2, "cm-5"), (1, "user-3")]
        );
        assert_eq!(tree[0].size(), 5);
    }

    #[test]
    fn leaves_omit_children_in_json() {
        let json = serde_json::to_value(member("cm-4", "Committee Member", vec![])).unwrap();
        assert!(json.get("children").is_none());
    }
}
