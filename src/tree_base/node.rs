pub type Link<R> = Option<Box<Node<R>>>;

#[derive(Debug)]
pub struct Node<R> {
    pub record: R,
    pub height: usize,
    pub left: Link<R>,
    pub right: Link<R>,
}

#[inline]
pub fn height<R>(link: &Link<R>) -> usize {
    link.as_ref().map_or(0, |n| n.height)
}

impl<R> Node<R> {
    pub fn new_leaf(record: R) -> Box<Self> {
        Box::new(Node {
            record,
            height: 1,
            left: None,
            right: None,
        })
    }

    #[inline]
    pub fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    /// Left height minus right height.
    #[inline]
    pub fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Rotate the subtree rooted at `y` to the right; `y.left` becomes the new
/// root. `y` must have a left child.
pub fn rotate_right<R>(mut y: Box<Node<R>>) -> Box<Node<R>> {
    let Some(mut x) = y.left.take() else {
        return y;
    };
    y.left = x.right.take();
    y.update_height();
    x.right = Some(y);
    x.update_height();
    x
}

/// Mirror of [`rotate_right`]; `x.right` becomes the new root.
pub fn rotate_left<R>(mut x: Box<Node<R>>) -> Box<Node<R>> {
    let Some(mut y) = x.right.take() else {
        return x;
    };
    x.right = y.left.take();
    x.update_height();
    y.left = Some(x);
    y.update_height();
    y
}

/// Release a subtree children first, then the node itself. Pending nodes
/// live on a heap stack, so a degenerate chain tears down in constant stack.
pub fn release_subtree<R>(link: Link<R>) -> usize {
    let mut released = 0;
    let mut pending: Vec<(Box<Node<R>>, bool)> = Vec::new();
    if let Some(n) = link {
        pending.push((n, false));
    }

    while let Some((mut n, expanded)) = pending.pop() {
        if expanded {
            drop(n);
            released += 1;
            continue;
        }
        let (left, right) = (n.left.take(), n.right.take());
        pending.push((n, true));
        if let Some(r) = right {
            pending.push((r, false));
        }
        if let Some(l) = left {
            pending.push((l, false));
        }
    }

    released
}
