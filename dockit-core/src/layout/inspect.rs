//! Opt-in diagnosis of saved layouts
//!
//! Loading never validates beyond JSON shape: engines repair what they
//! can and the codec preserves the rest. Hosts that want to vet a layout
//! before trusting it — and the `dockit-cli` `validate` command — run
//! [`inspect`] and decide what to do with the findings. [`stats`] powers
//! summary views.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::layout::wire::{SerializedLayout, SerializedNode};

/// A finding from a layout inspection, tagged with where it was seen.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutIssue {
    /// Slash-separated child path from the root (`main`, `main/0/1`, ...).
    pub path: String,
    /// What was found.
    pub kind: IssueKind,
}

impl fmt::Display for LayoutIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

/// The problems [`inspect`] reports.
#[derive(Debug, Clone, PartialEq)]
pub enum IssueKind {
    /// The same widget id appears in more than one config.
    DuplicateId(String),
    /// A widget id is the empty string.
    EmptyId,
    /// A split's size list does not match its child count.
    SizeCountMismatch {
        /// Number of size weights present.
        sizes: usize,
        /// Number of children present.
        children: usize,
    },
    /// A size weight is negative or not finite.
    InvalidSize(f64),
    /// A tab area has no widgets.
    EmptyTabArea,
    /// `currentIndex` does not address a member widget.
    CurrentIndexOutOfRange {
        /// The saved index.
        current_index: usize,
        /// Number of member widgets.
        widgets: usize,
    },
    /// A split has fewer than two children.
    DegenerateSplit(usize),
    /// A widget kind absent from the supplied kind set.
    UnknownKind(String),
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "duplicate widget id: {id}"),
            Self::EmptyId => write!(f, "widget id is empty"),
            Self::SizeCountMismatch { sizes, children } => {
                write!(f, "split has {sizes} sizes for {children} children")
            }
            Self::InvalidSize(size) => write!(f, "invalid size weight: {size}"),
            Self::EmptyTabArea => write!(f, "tab area has no widgets"),
            Self::CurrentIndexOutOfRange {
                current_index,
                widgets,
            } => write!(
                f,
                "currentIndex {current_index} out of range for {widgets} widgets"
            ),
            Self::DegenerateSplit(children) => {
                write!(f, "split has fewer than two children ({children})")
            }
            Self::UnknownKind(kind) => write!(f, "unknown widget kind: {kind}"),
        }
    }
}

/// Scans a saved layout for structural problems.
///
/// `known_kinds`, when given, additionally flags configs whose kind is
/// not in the set. An empty result means every invariant the live tree
/// maintains also holds on the wire.
#[must_use]
pub fn inspect(
    layout: &SerializedLayout,
    known_kinds: Option<&HashSet<String>>,
) -> Vec<LayoutIssue> {
    let mut issues = Vec::new();
    let mut seen_ids = HashSet::new();
    if let Some(root) = &layout.main {
        walk(root, "main", &mut seen_ids, known_kinds, &mut issues);
    }
    issues
}

fn walk(
    node: &SerializedNode,
    path: &str,
    seen_ids: &mut HashSet<String>,
    known_kinds: Option<&HashSet<String>>,
    issues: &mut Vec<LayoutIssue>,
) {
    let issue = |kind: IssueKind| LayoutIssue {
        path: path.to_string(),
        kind,
    };
    match node {
        SerializedNode::TabArea {
            widgets,
            current_index,
        } => {
            if widgets.is_empty() {
                issues.push(issue(IssueKind::EmptyTabArea));
            } else if *current_index >= widgets.len() {
                issues.push(issue(IssueKind::CurrentIndexOutOfRange {
                    current_index: *current_index,
                    widgets: widgets.len(),
                }));
            }
            for config in widgets {
                if config.id.is_empty() {
                    issues.push(issue(IssueKind::EmptyId));
                } else if !seen_ids.insert(config.id.to_string()) {
                    issues.push(issue(IssueKind::DuplicateId(config.id.to_string())));
                }
                if let Some(kinds) = known_kinds {
                    if !kinds.contains(&config.kind) {
                        issues.push(issue(IssueKind::UnknownKind(config.kind.clone())));
                    }
                }
            }
        }
        SerializedNode::SplitArea {
            sizes, children, ..
        } => {
            if children.len() < 2 {
                issues.push(issue(IssueKind::DegenerateSplit(children.len())));
            }
            if sizes.len() != children.len() {
                issues.push(issue(IssueKind::SizeCountMismatch {
                    sizes: sizes.len(),
                    children: children.len(),
                }));
            }
            for size in sizes {
                if !size.is_finite() || *size < 0.0 {
                    issues.push(issue(IssueKind::InvalidSize(*size)));
                }
            }
            for (index, child) in children.iter().enumerate() {
                let child_path = format!("{path}/{index}");
                walk(child, &child_path, seen_ids, known_kinds, issues);
            }
        }
    }
}

/// Summary statistics for a saved layout.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayoutStats {
    /// Total widget configs.
    pub widgets: usize,
    /// Tab area (leaf) count.
    pub tab_areas: usize,
    /// Split node count.
    pub splits: usize,
    /// Maximum nesting depth.
    pub depth: usize,
    /// Widget count per kind, ordered by kind name.
    pub kinds: BTreeMap<String, usize>,
}

/// Computes summary statistics for a saved layout.
#[must_use]
pub fn stats(layout: &SerializedLayout) -> LayoutStats {
    let mut out = LayoutStats {
        depth: layout.depth(),
        ..LayoutStats::default()
    };
    if let Some(root) = &layout.main {
        count(root, &mut out);
    }
    out
}

fn count(node: &SerializedNode, out: &mut LayoutStats) {
    match node {
        SerializedNode::TabArea { widgets, .. } => {
            out.tab_areas += 1;
            out.widgets += widgets.len();
            for config in widgets {
                *out.kinds.entry(config.kind.clone()).or_default() += 1;
            }
        }
        SerializedNode::SplitArea { children, .. } => {
            out.splits += 1;
            for child in children {
                count(child, out);
            }
        }
    }
}
