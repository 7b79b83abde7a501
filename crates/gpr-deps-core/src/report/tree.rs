//! Interactive tree sink.
//!
//! Accumulates a markup document (`projects > project > dependency > file`)
//! and, on completion, hands a sorted two-column [`TreeView`] to a
//! [`TreeViewer`]. Every node knows which file to open when clicked.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use super::{ReportError, Reporter};
use crate::types::{Classification, Project, SourceFile};

/// Title of the dependency tree view.
pub const VIEW_TITLE: &str = "Project dependencies";

/// What happens when a node is activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeAction {
    /// Open the file in an editor.
    OpenFile(PathBuf),
}

/// A row of the tree view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// First column.
    pub label: String,
    /// Second column.
    pub detail: String,
    /// Action on click.
    pub action: NodeAction,
    /// Nested rows.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn new(label: String, detail: String, file: &Path) -> Self {
        Self {
            label,
            detail,
            action: NodeAction::OpenFile(file.to_path_buf()),
            children: Vec::new(),
        }
    }

    fn sort(&mut self) {
        self.children.sort_by(|a, b| a.label.cmp(&b.label));
        for child in &mut self.children {
            child.sort();
        }
    }
}

/// A finished, sorted dependency tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeView {
    /// View title.
    pub title: String,
    /// The markup document the view was built from.
    pub markup: String,
    /// Project rows, sorted by name.
    pub roots: Vec<TreeNode>,
}

impl TreeView {
    /// Number of columns shown.
    pub const COLUMNS: usize = 2;

    /// Resolves a click on the node at `path` (child indices from the top).
    #[must_use]
    pub fn activate(&self, path: &[usize]) -> Option<&NodeAction> {
        let (first, rest) = path.split_first()?;
        let mut node = self.roots.get(*first)?;
        for &index in rest {
            node = node.children.get(index)?;
        }
        Some(&node.action)
    }

    /// Finds the node whose labels along the way match `labels`.
    #[must_use]
    pub fn find(&self, labels: &[&str]) -> Option<&TreeNode> {
        let (first, rest) = labels.split_first()?;
        let mut node = self.roots.iter().find(|n| n.label == *first)?;
        for label in rest {
            node = node.children.iter().find(|n| n.label == *label)?;
        }
        Some(node)
    }

    /// Renders the view as indented two-column text.
    #[must_use]
    pub fn render(&self) -> String {
        fn width(nodes: &[TreeNode], depth: usize) -> usize {
            nodes
                .iter()
                .map(|n| (depth * 2 + n.label.chars().count()).max(width(&n.children, depth + 1)))
                .max()
                .unwrap_or(0)
        }

        fn rows(out: &mut String, nodes: &[TreeNode], depth: usize, width: usize) {
            for node in nodes {
                let cell = format!("{}{}", "  ".repeat(depth), node.label);
                if node.detail.is_empty() {
                    let _ = writeln!(out, "{cell}");
                } else {
                    let _ = writeln!(out, "{cell:<width$}  {}", node.detail);
                }
                rows(out, &node.children, depth + 1, width);
            }
        }

        let mut out = format!("{}\n", self.title);
        rows(&mut out, &self.roots, 0, width(&self.roots, 0));
        out
    }
}

/// Host component that displays finished trees.
pub trait TreeViewer {
    /// Shows `view` to the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the view cannot be displayed.
    fn display(&mut self, view: TreeView) -> Result<(), ReportError>;
}

impl TreeViewer for Vec<TreeView> {
    fn display(&mut self, view: TreeView) -> Result<(), ReportError> {
        self.push(view);
        Ok(())
    }
}

impl<V: TreeViewer + ?Sized> TreeViewer for &mut V {
    fn display(&mut self, view: TreeView) -> Result<(), ReportError> {
        (**self).display(view)
    }
}

const MARKUP_HEADER: &str = "<?xml version='1.0' ?>\n<projects>\n";

/// Builds a [`TreeView`] for a [`TreeViewer`].
pub struct TreeReporter<V: TreeViewer> {
    viewer: V,
    markup: String,
    projects: Vec<TreeNode>,
    in_project: bool,
    in_dependency: bool,
}

impl<V: TreeViewer> TreeReporter<V> {
    /// Creates a tree reporter displaying into `viewer`.
    #[must_use]
    pub fn new(viewer: V) -> Self {
        Self {
            viewer,
            markup: MARKUP_HEADER.to_owned(),
            projects: Vec::new(),
            in_project: false,
            in_dependency: false,
        }
    }

    /// Markup accumulated so far.
    #[must_use]
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Consumes the reporter and returns the viewer.
    pub fn into_viewer(self) -> V {
        self.viewer
    }

    fn close_dependency(&mut self) {
        if self.in_dependency {
            self.markup.push_str("</dependency>\n");
            self.in_dependency = false;
        }
    }

    fn close_project(&mut self) {
        self.close_dependency();
        if self.in_project {
            self.markup.push_str("</project>\n");
            self.in_project = false;
        }
    }

    fn current_project(&mut self, what: &'static str) -> Result<&mut TreeNode, ReportError> {
        self.projects
            .last_mut()
            .ok_or(ReportError::NoCurrentProject(what))
    }
}

impl<V: TreeViewer> Reporter for TreeReporter<V> {
    fn begin_project(&mut self, project: &Project) -> Result<(), ReportError> {
        self.close_project();
        self.in_project = true;
        let _ = writeln!(self.markup, "<project name='{}'>", escape(&project.name));
        self.projects
            .push(TreeNode::new(project.name.clone(), String::new(), &project.file));
        Ok(())
    }

    fn emit_dependency(
        &mut self,
        dependency: &Project,
        classification: Classification,
    ) -> Result<(), ReportError> {
        let label = format!("{}{}", dependency.name, classification.annotation());
        self.current_project("dependency")?
            .children
            .push(TreeNode::new(label, String::new(), &dependency.file));

        self.close_dependency();
        self.in_dependency = true;
        let _ = writeln!(
            self.markup,
            "<dependency name='{}' extra='{}'>",
            escape(&dependency.name),
            escape(classification.annotation())
        );
        Ok(())
    }

    fn explain_dependency(
        &mut self,
        source: &SourceFile,
        imported: &SourceFile,
    ) -> Result<(), ReportError> {
        let node = TreeNode::new(source.basename(), imported.basename(), source.path());
        self.current_project("explanation")?
            .children
            .last_mut()
            .ok_or(ReportError::NoCurrentProject("explanation"))?
            .children
            .push(node);

        let _ = writeln!(
            self.markup,
            "<file src='{}'>{}</file>",
            escape(&source.to_string()),
            escape(&imported.to_string())
        );
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ReportError> {
        self.close_project();
        self.markup.push_str("</projects>\n");

        let mut roots = std::mem::take(&mut self.projects);
        roots.sort_by(|a, b| a.label.cmp(&b.label));
        for root in &mut roots {
            root.sort();
        }

        let view = TreeView {
            title: VIEW_TITLE.to_owned(),
            markup: std::mem::replace(&mut self.markup, MARKUP_HEADER.to_owned()),
            roots,
        };
        self.viewer.display(view)
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
