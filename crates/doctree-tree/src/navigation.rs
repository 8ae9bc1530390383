//! Page ordering and breadcrumbs.

use crate::entry::{EntryId, EntryKind};
use crate::tree::Tree;

/// Breadcrumb navigation item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreadcrumbItem {
    /// Directory handle.
    pub id: EntryId,
    /// Display title.
    pub title: String,
    /// Canonical request of the directory.
    pub request: String,
}

impl Tree {
    /// Content pages in reading order: depth-first, children in insertion order.
    #[must_use]
    pub fn content_pages(&self) -> Vec<EntryId> {
        let mut pages = Vec::new();
        let mut stack = vec![self.root()];

        while let Some(id) = stack.pop() {
            match &self.entry(id).kind {
                EntryKind::Directory(dir) => stack.extend(dir.children().iter().rev()),
                EntryKind::Content(_) => pages.push(id),
                EntryKind::Raw(_) => {}
            }
        }
        pages
    }

    /// Previous and next content pages around `id` in reading order.
    ///
    /// Both are `None` when `id` is not a content page.
    #[must_use]
    pub fn prev_next(&self, id: EntryId) -> (Option<EntryId>, Option<EntryId>) {
        let pages = self.content_pages();
        let Some(pos) = pages.iter().position(|&p| p == id) else {
            return (None, None);
        };

        let prev = pos.checked_sub(1).map(|i| pages[i]);
        let next = pages.get(pos + 1).copied();
        (prev, next)
    }

    /// Ancestor directories of `id`, root excluded, outermost first.
    #[must_use]
    pub fn breadcrumbs(&self, id: EntryId) -> Vec<BreadcrumbItem> {
        let mut crumbs = Vec::new();
        let mut current = self.parent(id);

        while let Some(dir) = current {
            let entry = self.entry(dir);
            let Some(parent) = entry.parent() else {
                break;
            };
            crumbs.push(BreadcrumbItem {
                id: dir,
                title: entry.title.clone(),
                request: entry.request.clone(),
            });
            current = Some(parent);
        }

        crumbs.reverse();
        crumbs
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::TreeBuilder;

    #[test]
    fn test_content_pages_depth_first() {
        let mut builder = TreeBuilder::new("Docs");
        let root = builder.root();
        let index = builder.add_content(root, "index.md", "Home", None).unwrap();
        let a = builder.add_directory(root, "a", "A").unwrap();
        let a1 = builder.add_content(a, "one.md", "One", None).unwrap();
        builder.add_raw(a, "logo.png", None).unwrap();
        let a2 = builder.add_content(a, "two.md", "Two", None).unwrap();
        let last = builder.add_content(root, "last.md", "Last", None).unwrap();
        let tree = builder.build();

        assert_eq!(tree.content_pages(), vec![index, a1, a2, last]);
    }

    #[test]
    fn test_prev_next() {
        let mut builder = TreeBuilder::new("Docs");
        let root = builder.root();
        let first = builder.add_content(root, "first.md", "First", None).unwrap();
        let dir = builder.add_directory(root, "dir", "Dir").unwrap();
        let middle = builder.add_content(dir, "middle.md", "Middle", None).unwrap();
        let last = builder.add_content(root, "last.md", "Last", None).unwrap();
        let tree = builder.build();

        assert_eq!(tree.prev_next(first), (None, Some(middle)));
        assert_eq!(tree.prev_next(middle), (Some(first), Some(last)));
        assert_eq!(tree.prev_next(last), (Some(middle), None));
        assert_eq!(tree.prev_next(dir), (None, None));
    }

    #[test]
    fn test_breadcrumbs() {
        let mut builder = TreeBuilder::new("Docs");
        let root = builder.root();
        let a = builder.add_directory(root, "a", "Section A").unwrap();
        let b = builder.add_directory(a, "b", "Section B").unwrap();
        let page = builder.add_content(b, "page.md", "Page", None).unwrap();
        let top = builder.add_content(root, "top.md", "Top", None).unwrap();
        let tree = builder.build();

        assert_eq!(
            tree.breadcrumbs(page),
            vec![
                BreadcrumbItem {
                    id: a,
                    title: "Section A".to_owned(),
                    request: "a".to_owned(),
                },
                BreadcrumbItem {
                    id: b,
                    title: "Section B".to_owned(),
                    request: "a/b".to_owned(),
                },
            ]
        );
        assert!(tree.breadcrumbs(top).is_empty());
        assert!(tree.breadcrumbs(root).is_empty());
    }
}
