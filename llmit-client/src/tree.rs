use anyhow::{anyhow, ensure};

use crate::api::{CommentId, CommentNode, PostId};

pub trait CommentTreeExt {
    /// All comments in display order, along with their depth
    fn walk(&self) -> Vec<(usize, &CommentNode)>;

    fn count_comments(&self) -> usize;

    /// Depth of the deepest comment, None for an empty thread
    fn max_depth(&self) -> Option<usize>;

    fn find(&self, id: CommentId) -> Option<&CommentNode>;

    /// Check that every comment belongs to `post` and that children point
    /// back to their parent
    fn check_links(&self, post: PostId) -> anyhow::Result<()>;

    /// Fill in the parent of nested comments that came without one, as the
    /// server only conveys it through nesting
    fn link_parents(&mut self);
}

impl CommentTreeExt for [CommentNode] {
    fn walk(&self) -> Vec<(usize, &CommentNode)> {
        // Explicit stack, threads can get arbitrarily deep
        let mut res = Vec::new();
        let mut stack = self.iter().rev().map(|c| (0, c)).collect::<Vec<_>>();
        while let Some((depth, c)) = stack.pop() {
            res.push((depth, c));
            stack.extend(c.children.iter().rev().map(|child| (depth + 1, child)));
        }
        res
    }

    fn count_comments(&self) -> usize {
        self.walk().len()
    }

    fn max_depth(&self) -> Option<usize> {
        self.walk().into_iter().map(|(depth, _)| depth).max()
    }

    fn find(&self, id: CommentId) -> Option<&CommentNode> {
        self.walk()
            .into_iter()
            .map(|(_, c)| c)
            .find(|c| c.id == id)
    }

    fn check_links(&self, post: PostId) -> anyhow::Result<()> {
        for c in self {
            ensure!(
                c.parent_comment_id.is_none(),
                "top-level comment {} has parent {:?}",
                c.id,
                c.parent_comment_id
            );
        }
        for (_, c) in self.walk() {
            ensure!(
                c.post_id == post,
                "comment {} belongs to post {} instead of {}",
                c.id,
                c.post_id,
                post
            );
            if let Some(child) = c.children.iter().find(|ch| ch.parent_comment_id != Some(c.id)) {
                return Err(anyhow!(
                    "comment {} is a child of {} but points to {:?}",
                    child.id,
                    c.id,
                    child.parent_comment_id
                ));
            }
        }
        Ok(())
    }

    fn link_parents(&mut self) {
        let mut stack = self.iter_mut().collect::<Vec<_>>();
        while let Some(c) = stack.pop() {
            let id = c.id;
            for child in c.children.iter_mut() {
                child.parent_comment_id.get_or_insert(id);
                stack.push(child);
            }
        }
    }
}

/// Build a well-linked thread for `post` out of a compact shape description
///
/// Each byte of `shape` adds one comment, attached to the comment at index
/// `byte % (number of comments so far + 1)`, where index 0 means the post
/// itself.
#[cfg(test)]
pub(crate) fn thread_from_shape(post: PostId, shape: &[u8]) -> Vec<CommentNode> {
    fn insert(nodes: &mut Vec<CommentNode>, parent: CommentId, c: &mut Option<CommentNode>) {
        for n in nodes.iter_mut() {
            if c.is_none() {
                return;
            }
            if n.id == parent {
                n.children.push(c.take().unwrap());
                return;
            }
            insert(&mut n.children, parent, c);
        }
    }

    let mut roots = Vec::new();
    for (i, b) in shape.iter().enumerate() {
        let id = CommentId(i as i64 + 1);
        let parent = match *b as usize % (i + 1) {
            0 => None,
            p => Some(CommentId(p as i64)),
        };
        let mut c = CommentNode::new(id, post, parent);
        c.author = format!("user{}", b % 7);
        c.content = format!("comment number {}", id);
        match parent {
            None => roots.push(c),
            Some(p) => insert(&mut roots, p, &mut Some(c)),
        }
    }
    roots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_is_depth_first_in_server_order() {
        // 1 -> (2 -> 4), 3
        let tree = thread_from_shape(PostId(42), &[0, 1, 0, 2]);
        let ids = tree
            .walk()
            .into_iter()
            .map(|(d, c)| (d, c.id.0))
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![(0, 1), (1, 2), (2, 4), (0, 3)]);
        assert_eq!(tree.count_comments(), 4);
        assert_eq!(tree.max_depth(), Some(2));
        assert_eq!(tree.find(CommentId(4)).map(|c| c.parent_comment_id), Some(Some(CommentId(2))));
        assert!(tree.find(CommentId(5)).is_none());
    }

    #[test]
    fn empty_thread() {
        let tree: Vec<CommentNode> = Vec::new();
        assert_eq!(tree.max_depth(), None);
        assert_eq!(tree.count_comments(), 0);
        tree.check_links(PostId(1)).unwrap();
    }

    #[test]
    fn deep_thread_does_not_overflow() {
        let mut node = CommentNode::new(CommentId(20_000), PostId(1), Some(CommentId(19_999)));
        for id in (1..20_000).rev() {
            let parent = (id > 1).then(|| CommentId(id - 1));
            let mut up = CommentNode::new(CommentId(id), PostId(1), parent);
            up.children.push(node);
            node = up;
        }
        let tree = vec![node];
        assert_eq!(tree.max_depth(), Some(19_999));
        tree.check_links(PostId(1)).unwrap();
        // Dropping a deeply-nested Vec recurses, so leak the tree instead
        std::mem::forget(tree);
    }

    #[test]
    fn check_links_catches_mismatches() {
        let mut tree = thread_from_shape(PostId(42), &[0, 1]);
        tree.check_links(PostId(42)).unwrap();
        assert!(tree.check_links(PostId(43)).is_err());
        tree[0].children[0].parent_comment_id = Some(CommentId(99));
        assert!(tree.check_links(PostId(42)).is_err());
    }

    #[test]
    fn link_parents_fills_in_nesting_only() {
        let mut tree = thread_from_shape(PostId(42), &[0, 1, 0, 2]);
        let expected = tree.clone();
        for (_, c) in tree.walk() {
            assert!(c.is_top_level() == (c.id.0 == 1 || c.id.0 == 3));
        }
        tree[0].children[0].parent_comment_id = None;
        tree[0].children[0].children[0].parent_comment_id = None;
        tree.link_parents();
        assert_eq!(tree, expected);

        // Parents already present are left for check_links to judge
        tree[0].children[0].parent_comment_id = Some(CommentId(99));
        tree.link_parents();
        assert_eq!(tree[0].children[0].parent_comment_id, Some(CommentId(99)));
    }

    #[test]
    fn generated_threads_are_well_linked() {
        bolero::check!()
            .with_type::<Vec<u8>>()
            .for_each(|shape: &Vec<u8>| {
                let mut tree = thread_from_shape(PostId(7), shape);
                tree.check_links(PostId(7)).unwrap();
                assert_eq!(tree.count_comments(), shape.len());
                let linked = tree.clone();
                let mut stack = tree.iter_mut().collect::<Vec<_>>();
                while let Some(c) = stack.pop() {
                    c.parent_comment_id = None;
                    stack.extend(c.children.iter_mut());
                }
                tree.link_parents();
                assert_eq!(tree, linked);
            });
    }
}
