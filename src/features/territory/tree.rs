use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::features::territory::models::RecordStatus;

/// Level of a node in the territory hierarchy, root first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Island,
    Group,
    Area,
    IupZone,
    IupSegmentation,
    Iup,
}

impl NodeType {
    /// Type of the nodes found at `level` (0 = island). Anything deeper than
    /// the segmentation level is an IUP.
    pub fn from_level(level: usize) -> Self {
        match level {
            0 => NodeType::Island,
            1 => NodeType::Group,
            2 => NodeType::Area,
            3 => NodeType::IupZone,
            4 => NodeType::IupSegmentation,
            _ => NodeType::Iup,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NodeType::Island => "Island",
            NodeType::Group => "Group",
            NodeType::Area => "Area",
            NodeType::IupZone => "IUP Zone",
            NodeType::IupSegmentation => "IUP Segmentation",
            NodeType::Iup => "IUP",
        }
    }
}

/// Nested node as delivered by the backend.
///
/// `children` are exactly the next-level entities scoped to this node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerritoryNode {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    #[serde(default)]
    pub children: Vec<TerritoryNode>,
}

/// Identity of a node. Ids are only unique within a level, so the type is
/// part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeKey {
    pub node_type: NodeType,
    pub id: String,
}

impl NodeKey {
    pub fn new(node_type: NodeType, id: impl Into<String>) -> Self {
        Self {
            node_type,
            id: id.into(),
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}:{}", self.node_type, self.id)
    }
}

impl FromStr for NodeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "island" => Ok(NodeType::Island),
            "group" => Ok(NodeType::Group),
            "area" => Ok(NodeType::Area),
            "iupzone" => Ok(NodeType::IupZone),
            "iupsegmentation" => Ok(NodeType::IupSegmentation),
            "iup" => Ok(NodeType::Iup),
            _ => Err(format!("Unknown territory level: {}", s)),
        }
    }
}

/// Parses `<type>:<id>`, e.g. `group:12` or `IupZone:3`
impl FromStr for NodeKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (node_type, id) = s
            .split_once(':')
            .ok_or_else(|| format!("Expected <type>:<id>, got '{}'", s))?;
        if id.trim().is_empty() {
            return Err(format!("Missing id in '{}'", s));
        }
        Ok(NodeKey::new(node_type.parse()?, id.trim()))
    }
}

/// One displayable row of the flattened tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeRow {
    pub key: NodeKey,
    pub id: String,
    pub name: String,
    pub code: Option<String>,
    pub status: Option<RecordStatus>,
    pub node_type: NodeType,
    pub level: usize,
    pub parent_id: Option<String>,
    pub parent: Option<NodeKey>,
    /// Rows without children get no expand affordance
    pub has_children: bool,
    pub child_count: usize,
}

/// Flatten the tree depth-first, each row emitted before its children
pub fn flatten(tree: &[TerritoryNode]) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    for node in tree {
        push_rows(node, 0, None, &mut rows);
    }
    rows
}

fn push_rows(
    node: &TerritoryNode,
    level: usize,
    parent: Option<&NodeKey>,
    rows: &mut Vec<TreeRow>,
) {
    let node_type = NodeType::from_level(level);
    let key = NodeKey::new(node_type, node.id.clone());

    rows.push(TreeRow {
        key: key.clone(),
        id: node.id.clone(),
        name: node.name.clone(),
        code: node.code.clone(),
        status: node.status,
        node_type,
        level,
        parent_id: parent.map(|p| p.id.clone()),
        parent: parent.cloned(),
        has_children: !node.children.is_empty(),
        child_count: node.children.len(),
    });

    for child in &node.children {
        push_rows(child, level + 1, Some(&key), rows);
    }
}

/// Total number of nodes in the tree
pub fn node_count(tree: &[TerritoryNode]) -> usize {
    tree.iter().map(|n| 1 + node_count(&n.children)).sum()
}

/// Locate a node by key
pub fn find_node<'a>(tree: &'a [TerritoryNode], key: &NodeKey) -> Option<&'a TerritoryNode> {
    fn walk<'a>(
        nodes: &'a [TerritoryNode],
        level: usize,
        key: &NodeKey,
    ) -> Option<&'a TerritoryNode> {
        let node_type = NodeType::from_level(level);
        for node in nodes {
            if node_type == key.node_type && node.id == key.id {
                return Some(node);
            }
            if node_type < key.node_type {
                if let Some(found) = walk(&node.children, level + 1, key) {
                    return Some(found);
                }
            }
        }
        None
    }
    walk(tree, 0, key)
}

/// Keys of every transitive descendant of `key`, excluding `key` itself
pub fn descendant_keys(tree: &[TerritoryNode], key: &NodeKey) -> Vec<NodeKey> {
    fn collect(node: &TerritoryNode, level: usize, out: &mut Vec<NodeKey>) {
        for child in &node.children {
            out.push(NodeKey::new(NodeType::from_level(level + 1), child.id.clone()));
            collect(child, level + 1, out);
        }
    }

    let mut out = Vec::new();
    if let Some(node) = find_node(tree, key) {
        collect(node, key.node_type as usize, &mut out);
    }
    out
}

/// Keys on the path from the root down to `key`, root first, excluding `key`.
/// Empty when `key` is not in the tree.
pub fn ancestor_keys(tree: &[TerritoryNode], key: &NodeKey) -> Vec<NodeKey> {
    fn walk(nodes: &[TerritoryNode], level: usize, key: &NodeKey, path: &mut Vec<NodeKey>) -> bool {
        let node_type = NodeType::from_level(level);
        for node in nodes {
            if node_type == key.node_type && node.id == key.id {
                return true;
            }
            if node_type < key.node_type {
                path.push(NodeKey::new(node_type, node.id.clone()));
                if walk(&node.children, level + 1, key, path) {
                    return true;
                }
                path.pop();
            }
        }
        false
    }

    let mut path = Vec::new();
    if walk(tree, 0, key, &mut path) {
        path
    } else {
        Vec::new()
    }
}

/// Set of expanded nodes, passed around by value.
///
/// Operations return the new set instead of mutating shared state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedSet(BTreeSet<NodeKey>);

impl ExpandedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &NodeKey) -> bool {
        self.0.contains(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeKey> {
        self.0.iter()
    }

    pub fn expand(mut self, key: NodeKey) -> Self {
        self.0.insert(key);
        self
    }

    /// Expand `key` together with every ancestor so its children are shown
    pub fn reveal(mut self, tree: &[TerritoryNode], key: NodeKey) -> Self {
        self.0.extend(ancestor_keys(tree, &key));
        self.0.insert(key);
        self
    }

    /// Collapse `key` and forget the expansion of all its descendants, so a
    /// later re-expand shows them collapsed.
    pub fn collapse(mut self, tree: &[TerritoryNode], key: &NodeKey) -> Self {
        self.0.remove(key);
        for descendant in descendant_keys(tree, key) {
            self.0.remove(&descendant);
        }
        self
    }

    /// Flip `key`. Unknown nodes and nodes without children are left alone.
    pub fn toggle(self, tree: &[TerritoryNode], key: &NodeKey) -> Self {
        match find_node(tree, key) {
            Some(node) if !node.children.is_empty() => {
                if self.contains(key) {
                    self.collapse(tree, key)
                } else {
                    self.expand(key.clone())
                }
            }
            _ => self,
        }
    }

    /// Expand every node that has children
    pub fn expand_all(tree: &[TerritoryNode]) -> Self {
        let keys = flatten(tree)
            .into_iter()
            .filter(|row| row.has_children)
            .map(|row| row.key);
        Self(keys.collect())
    }
}

impl FromIterator<NodeKey> for ExpandedSet {
    fn from_iter<I: IntoIterator<Item = NodeKey>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Rows to display: level 0, or rows whose parent is expanded
pub fn visible_rows<'a>(rows: &'a [TreeRow], expanded: &ExpandedSet) -> Vec<&'a TreeRow> {
    rows.iter()
        .filter(|row| {
            row.level == 0
                || row
                    .parent
                    .as_ref()
                    .is_some_and(|parent| expanded.contains(parent))
        })
        .collect()
}

/// `(tree, expanded) -> visible rows` in one step
pub fn view(tree: &[TerritoryNode], expanded: &ExpandedSet) -> Vec<TreeRow> {
    let rows = flatten(tree);
    visible_rows(&rows, expanded).into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn node(id: &str, children: Vec<TerritoryNode>) -> TerritoryNode {
        TerritoryNode {
            id: id.to_string(),
            name: format!("Node {}", id),
            code: None,
            status: Some(RecordStatus::Active),
            children,
        }
    }

    /// Island → Group → Area → Zone → Segmentation → IUP, plus side branches
    fn sample_tree() -> Vec<TerritoryNode> {
        vec![
            node(
                "1",
                vec![
                    node(
                        "1",
                        vec![node(
                            "a1",
                            vec![node(
                                "z1",
                                vec![node("s1", vec![node("iup1", vec![]), node("iup2", vec![])])],
                            )],
                        )],
                    ),
                    node("2", vec![]),
                ],
            ),
            node("2", vec![node("3", vec![node("a2", vec![])])]),
        ]
    }

    fn key(level: usize, id: &str) -> NodeKey {
        NodeKey::new(NodeType::from_level(level), id)
    }

    #[test]
    fn test_flatten_emits_one_row_per_node_in_preorder() {
        let tree = sample_tree();
        let rows = flatten(&tree);
        assert_eq!(rows.len(), node_count(&tree));
        assert_eq!(rows.len(), 11);

        let order: Vec<(usize, &str)> = rows.iter().map(|r| (r.level, r.id.as_str())).collect();
        assert_eq!(
            order,
            vec![
                (0, "1"),
                (1, "1"),
                (2, "a1"),
                (3, "z1"),
                (4, "s1"),
                (5, "iup1"),
                (5, "iup2"),
                (1, "2"),
                (0, "2"),
                (1, "3"),
                (2, "a2"),
            ]
        );
        assert_eq!(rows[5].node_type, NodeType::Iup);
    }

    #[test]
    fn test_parent_ids_point_to_shallower_rows() {
        let tree = sample_tree();
        let rows = flatten(&tree);
        let levels: HashMap<&NodeKey, usize> = rows.iter().map(|r| (&r.key, r.level)).collect();

        for row in &rows {
            match &row.parent {
                Some(parent) => {
                    let parent_level = levels.get(parent).copied().expect("parent present");
                    assert!(parent_level < row.level);
                    assert_eq!(row.parent_id.as_deref(), Some(parent.id.as_str()));
                }
                None => assert_eq!(row.level, 0),
            }
        }
    }

    #[test]
    fn test_ids_repeated_across_levels_do_not_collide() {
        let tree = sample_tree();
        // island "1" and group "1" share an id
        let expanded = ExpandedSet::new().expand(key(0, "1"));
        let visible = view(&tree, &expanded);
        let ids: Vec<_> = visible.iter().map(|r| r.key.to_string()).collect();
        assert_eq!(ids, vec!["Island:1", "Group:1", "Group:2", "Island:2"]);
    }

    #[test]
    fn test_only_roots_visible_when_nothing_expanded() {
        let tree = sample_tree();
        let visible = view(&tree, &ExpandedSet::new());
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|r| r.level == 0));
    }

    #[test]
    fn test_collapse_removes_descendants_and_reexpand_keeps_them_collapsed() {
        let tree = sample_tree();
        let expanded = ExpandedSet::new()
            .expand(key(0, "1"))
            .expand(key(1, "1"))
            .expand(key(2, "a1"))
            .expand(key(3, "z1"));
        assert_eq!(view(&tree, &expanded).len(), 7);

        let collapsed = expanded.collapse(&tree, &key(1, "1"));
        assert!(collapsed.contains(&key(0, "1")));
        assert!(!collapsed.contains(&key(1, "1")));
        assert!(!collapsed.contains(&key(2, "a1")));
        assert!(!collapsed.contains(&key(3, "z1")));

        let reexpanded = collapsed.toggle(&tree, &key(1, "1"));
        let visible = view(&tree, &reexpanded);
        let ids: Vec<_> = visible.iter().map(|r| r.id.as_str()).collect();
        // the area shows up again, but its zone does not
        assert_eq!(ids, vec!["1", "1", "a1", "2", "2"]);
    }

    #[test]
    fn test_leaf_has_no_affordance_and_toggle_is_noop() {
        let tree = sample_tree();
        let rows = flatten(&tree);
        let leaf = rows.iter().find(|r| r.id == "iup1").unwrap();
        assert!(!leaf.has_children);
        assert_eq!(leaf.child_count, 0);

        let expanded = ExpandedSet::new().toggle(&tree, &key(5, "iup1"));
        assert!(expanded.is_empty());

        let unknown = ExpandedSet::new().toggle(&tree, &key(0, "missing"));
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_descendant_keys_covers_whole_subtree() {
        let tree = sample_tree();
        let keys = descendant_keys(&tree, &key(0, "1"));
        assert_eq!(keys.len(), 7);
        assert!(keys.contains(&key(5, "iup2")));
        assert!(!keys.contains(&key(0, "1")));
    }

    #[test]
    fn test_expand_all_shows_everything() {
        let tree = sample_tree();
        let expanded = ExpandedSet::expand_all(&tree);
        assert_eq!(view(&tree, &expanded).len(), node_count(&tree));
    }

    #[test]
    fn test_ancestor_keys_lists_path_root_first() {
        let tree = sample_tree();
        assert_eq!(
            ancestor_keys(&tree, &key(3, "z1")),
            vec![key(0, "1"), key(1, "1"), key(2, "a1")]
        );
        assert!(ancestor_keys(&tree, &key(0, "2")).is_empty());
        assert!(ancestor_keys(&tree, &key(2, "missing")).is_empty());
    }

    #[test]
    fn test_reveal_shows_node_and_its_children() {
        let tree = sample_tree();
        let expanded = ExpandedSet::new().reveal(&tree, key(1, "3"));

        let ids: Vec<_> = view(&tree, &expanded).into_iter().map(|r| r.key).collect();
        assert_eq!(ids, vec![key(0, "1"), key(0, "2"), key(1, "3"), key(2, "a2")]);
    }

    #[test]
    fn test_node_key_round_trips_through_display() {
        let key = NodeKey::new(NodeType::IupZone, "3");
        assert_eq!(key.to_string(), "IupZone:3");
        assert_eq!("IupZone:3".parse::<NodeKey>(), Ok(key));
        assert_eq!(
            "iup-segmentation:9".parse::<NodeKey>(),
            Ok(NodeKey::new(NodeType::IupSegmentation, "9"))
        );
        assert!("group".parse::<NodeKey>().is_err());
        assert!("planet:1".parse::<NodeKey>().is_err());
        assert!("area:".parse::<NodeKey>().is_err());
    }

    #[test]
    fn test_deserialize_nested_tree() {
        let json = serde_json::json!([
            {"id": "1", "name": "Kalimantan", "code": "KAL", "status": "active",
             "children": [{"id": "10", "name": "North Group"}]}
        ]);
        let tree: Vec<TerritoryNode> = serde_json::from_value(json).unwrap();
        assert_eq!(tree[0].children.len(), 1);
        assert!(tree[0].children[0].children.is_empty());
        assert_eq!(tree[0].status, Some(RecordStatus::Active));
    }
}
