use log::{debug, trace};
use crate::models::{BoundingBox2D, Point2D};
use crate::utils::{LayoutError, DEFAULT_SPLIT_POLICY};

/// Controls when a leaf bucket is converted into a node.
///
/// A leaf is split once an insertion would bring it to `max_leaf_size` items. Leaves whose
/// points all coincide, and leaves at depth `max_depth` or deeper, are never split because
/// no quadrant division could separate their items.
///
/// # Examples
///
/// ```
/// use rs_force_layout::quadtree::SplitPolicy;
///
/// let policy = SplitPolicy::default();
/// assert_eq!(policy.max_leaf_size, 32);
///
/// assert!(SplitPolicy::new(1, 10).is_err());
/// assert!(SplitPolicy::new(4, 10).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitPolicy {
    pub max_leaf_size: usize,
    pub max_depth: usize,
}

impl Default for SplitPolicy {
    fn default() -> Self {
        DEFAULT_SPLIT_POLICY
    }
}

impl SplitPolicy {
    pub fn new(max_leaf_size: usize, max_depth: usize) -> Result<Self, LayoutError> {
        if max_leaf_size < 2 {
            return Err(LayoutError::InvalidLeafCapacity(max_leaf_size));
        }
        if max_depth == 0 {
            return Err(LayoutError::InvalidDepth(max_depth));
        }
        Ok(SplitPolicy { max_leaf_size, max_depth })
    }
}

/// One of the four partitions of a bounding box around its center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Quadrant {
    /// Classifies `point` relative to the center of `bounding_box`.
    ///
    /// Ties go to the greater-or-equal side on both axes, so the center itself is north-east.
    /// Points outside the box are classified the same way, which tells the tree which
    /// direction to grow in.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_force_layout::models::{BoundingBox2D, Point2D};
    /// use rs_force_layout::quadtree::Quadrant;
    ///
    /// let bbox = BoundingBox2D::from_extrema(0.0, 0.0, 2.0, 2.0);
    /// assert_eq!(Quadrant::of(&bbox, Point2D::new(1.0, 1.0)), Quadrant::NorthEast);
    /// assert_eq!(Quadrant::of(&bbox, Point2D::new(0.5, 1.0)), Quadrant::NorthWest);
    /// assert_eq!(Quadrant::of(&bbox, Point2D::new(1.0, 0.5)), Quadrant::SouthEast);
    /// assert_eq!(Quadrant::of(&bbox, Point2D::new(0.5, 0.5)), Quadrant::SouthWest);
    /// ```
    pub fn of(bounding_box: &BoundingBox2D, point: Point2D) -> Quadrant {
        let center = bounding_box.center();
        if point.y >= center.y {
            if point.x >= center.x {
                Quadrant::NorthEast
            } else {
                Quadrant::NorthWest
            }
        } else if point.x >= center.x {
            Quadrant::SouthEast
        } else {
            Quadrant::SouthWest
        }
    }

    /// The diagonally opposite quadrant.
    pub fn opposite(self) -> Quadrant {
        match self {
            Quadrant::NorthEast => Quadrant::SouthWest,
            Quadrant::NorthWest => Quadrant::SouthEast,
            Quadrant::SouthEast => Quadrant::NorthWest,
            Quadrant::SouthWest => Quadrant::NorthEast,
        }
    }
}

/// The four children of a [`QuadTree::Node`].
#[derive(Debug, Clone)]
pub struct Quadrants<A, I> {
    pub nw: QuadTree<A, I>,
    pub ne: QuadTree<A, I>,
    pub se: QuadTree<A, I>,
    pub sw: QuadTree<A, I>,
}

impl<A, I> Quadrants<A, I> {
    pub fn empty() -> Self {
        Quadrants {
            nw: QuadTree::Empty,
            ne: QuadTree::Empty,
            se: QuadTree::Empty,
            sw: QuadTree::Empty,
        }
    }

    pub fn get(&self, quadrant: Quadrant) -> &QuadTree<A, I> {
        match quadrant {
            Quadrant::NorthWest => &self.nw,
            Quadrant::NorthEast => &self.ne,
            Quadrant::SouthEast => &self.se,
            Quadrant::SouthWest => &self.sw,
        }
    }

    pub fn get_mut(&mut self, quadrant: Quadrant) -> &mut QuadTree<A, I> {
        match quadrant {
            Quadrant::NorthWest => &mut self.nw,
            Quadrant::NorthEast => &mut self.ne,
            Quadrant::SouthEast => &mut self.se,
            Quadrant::SouthWest => &mut self.sw,
        }
    }

    /// Children in `nw, ne, se, sw` order.
    pub fn iter(&self) -> impl Iterator<Item = &QuadTree<A, I>> {
        [&self.nw, &self.ne, &self.se, &self.sw].into_iter()
    }
}

/// Adaptive quadtree over items that map to points.
///
/// * `Empty` - no data.
/// * `Leaf` - a bucket of nearby items that has not been split yet; `items` is never empty.
/// * `Node` - an internal node owning one subtree per quadrant.
///
/// `A` is the per-node aggregate. Freshly built trees carry `()`; see
/// [`QuadTree::perform_aggregate`] for filling it in.
///
/// # Examples
///
/// ```
/// use rs_force_layout::models::Point2D;
/// use rs_force_layout::quadtree::QuadTree;
///
/// let points = vec![Point2D::new(0.0, 0.0), Point2D::new(4.0, 2.0), Point2D::new(-1.0, 3.0)];
/// let tree = QuadTree::from_items(|p: &Point2D| *p, points);
///
/// assert_eq!(tree.size(), 3);
/// let bbox = tree.bounding_box().unwrap();
/// assert_eq!(bbox.extrema(), (-1.0, 0.0, 4.0, 3.0));
/// ```
#[derive(Debug, Clone)]
pub enum QuadTree<A, I> {
    Empty,
    Leaf {
        bounding_box: BoundingBox2D,
        aggregate: A,
        items: Vec<I>,
    },
    Node {
        bounding_box: BoundingBox2D,
        aggregate: A,
        children: Box<Quadrants<A, I>>,
    },
}

impl<A, I> Default for QuadTree<A, I> {
    fn default() -> Self {
        QuadTree::Empty
    }
}

impl<I> QuadTree<(), I> {
    /// A leaf holding a single item.
    pub fn singleton<F>(to_point: F, item: I) -> Self
    where
        F: Fn(&I) -> Point2D,
    {
        let point = to_point(&item);
        Self::leaf_at(point, item)
    }

    fn leaf_at(point: Point2D, item: I) -> Self {
        QuadTree::Leaf {
            bounding_box: BoundingBox2D::singleton(point),
            aggregate: (),
            items: vec![item],
        }
    }

    /// Builds a tree by inserting `items` one after another with the default [`SplitPolicy`].
    pub fn from_items<F, T>(to_point: F, items: T) -> Self
    where
        F: Fn(&I) -> Point2D,
        T: IntoIterator<Item = I>,
    {
        Self::from_items_with(&SplitPolicy::default(), to_point, items)
    }

    pub fn from_items_with<F, T>(policy: &SplitPolicy, to_point: F, items: T) -> Self
    where
        F: Fn(&I) -> Point2D,
        T: IntoIterator<Item = I>,
    {
        items
            .into_iter()
            .fold(QuadTree::Empty, |tree, item| tree.insert_with(policy, &to_point, item))
    }

    /// Inserts an item with the default [`SplitPolicy`], returning the new tree.
    pub fn insert<F>(self, to_point: F, item: I) -> Self
    where
        F: Fn(&I) -> Point2D,
    {
        self.insert_with(&SplitPolicy::default(), &to_point, item)
    }

    /// Inserts an item, returning the new tree.
    ///
    /// Untouched subtrees are moved into the result, not copied.
    pub fn insert_with<F>(self, policy: &SplitPolicy, to_point: &F, item: I) -> Self
    where
        F: Fn(&I) -> Point2D,
    {
        self.insert_at(policy, to_point, item, 0)
    }

    // Recursion depth follows spatial subdivision, not item count.
    fn insert_at<F>(self, policy: &SplitPolicy, to_point: &F, item: I, depth: usize) -> Self
    where
        F: Fn(&I) -> Point2D,
    {
        let point = to_point(&item);
        match self {
            QuadTree::Empty => Self::leaf_at(point, item),
            QuadTree::Leaf { bounding_box, mut items, .. } => {
                let bounding_box = bounding_box.union(&BoundingBox2D::singleton(point));
                items.push(item);
                if items.len() < policy.max_leaf_size {
                    return QuadTree::Leaf { bounding_box, aggregate: (), items };
                }
                if bounding_box.is_degenerate() || depth >= policy.max_depth {
                    if items.len() == policy.max_leaf_size {
                        debug!(
                            "Keeping oversized leaf at depth {} ({} items, degenerate: {})",
                            depth,
                            items.len(),
                            bounding_box.is_degenerate()
                        );
                    }
                    return QuadTree::Leaf { bounding_box, aggregate: (), items };
                }
                let node = QuadTree::Node {
                    bounding_box,
                    aggregate: (),
                    children: Box::new(Quadrants::empty()),
                };
                items
                    .into_iter()
                    .fold(node, |tree, item| tree.insert_at(policy, to_point, item, depth))
            }
            QuadTree::Node { bounding_box, aggregate, mut children } => {
                if bounding_box.contains(point) {
                    let child = children.get_mut(Quadrant::of(&bounding_box, point));
                    let subtree = std::mem::take(child);
                    *child = subtree.insert_at(policy, to_point, item, depth + 1);
                    // A child that grew by doubling can overshoot this box.
                    let bounding_box = match child.bounding_box() {
                        Some(child_box) => bounding_box.union(child_box),
                        None => bounding_box,
                    };
                    return QuadTree::Node { bounding_box, aggregate, children };
                }

                let quadrant = Quadrant::of(&bounding_box, point);
                let grown = grow_towards(&bounding_box, quadrant, point);
                trace!(
                    "Growing tree towards {:?}: {:?} -> {:?}",
                    quadrant, bounding_box, grown
                );

                let mut quadrants = Quadrants::empty();
                *quadrants.get_mut(quadrant) = Self::leaf_at(point, item);
                *quadrants.get_mut(quadrant.opposite()) = QuadTree::Node {
                    bounding_box,
                    aggregate,
                    children,
                };
                QuadTree::Node {
                    bounding_box: grown,
                    aggregate: (),
                    children: Box::new(quadrants),
                }
            }
        }
    }
}

/// Doubles `bounding_box` in the direction of `quadrant`.
///
/// The extrema move by exactly one width/height. A point further out than that, or one beside a
/// zero-extent dimension, is covered by a final union with its singleton box.
fn grow_towards(bounding_box: &BoundingBox2D, quadrant: Quadrant, point: Point2D) -> BoundingBox2D {
    let (min_x, min_y, max_x, max_y) = bounding_box.extrema();
    let (width, height) = bounding_box.dimensions();
    let doubled = match quadrant {
        Quadrant::NorthEast => BoundingBox2D::from_extrema(min_x, min_y, max_x + width, max_y + height),
        Quadrant::NorthWest => BoundingBox2D::from_extrema(min_x - width, min_y, max_x, max_y + height),
        Quadrant::SouthEast => BoundingBox2D::from_extrema(min_x, min_y - height, max_x + width, max_y),
        Quadrant::SouthWest => BoundingBox2D::from_extrema(min_x - width, min_y - height, max_x, max_y),
    };
    doubled.union(&BoundingBox2D::singleton(point))
}

impl<A, I> QuadTree<A, I> {
    pub fn is_empty(&self) -> bool {
        matches!(self, QuadTree::Empty)
    }

    pub fn bounding_box(&self) -> Option<&BoundingBox2D> {
        match self {
            QuadTree::Empty => None,
            QuadTree::Leaf { bounding_box, .. } | QuadTree::Node { bounding_box, .. } => Some(bounding_box),
        }
    }

    pub fn aggregate(&self) -> Option<&A> {
        match self {
            QuadTree::Empty => None,
            QuadTree::Leaf { aggregate, .. } | QuadTree::Node { aggregate, .. } => Some(aggregate),
        }
    }

    /// Number of items stored in the tree.
    pub fn size(&self) -> usize {
        match self {
            QuadTree::Empty => 0,
            QuadTree::Leaf { items, .. } => items.len(),
            QuadTree::Node { children, .. } => children.iter().map(QuadTree::size).sum(),
        }
    }

    /// Number of levels, counting a lone leaf as 1.
    pub fn depth(&self) -> usize {
        match self {
            QuadTree::Empty => 0,
            QuadTree::Leaf { .. } => 1,
            QuadTree::Node { children, .. } => {
                1 + children.iter().map(QuadTree::depth).max().unwrap_or(0)
            }
        }
    }

    /// All items, children visited in `nw, ne, se, sw` order.
    pub fn items(&self) -> Vec<&I> {
        let mut collected = Vec::with_capacity(self.size());
        self.collect_items(&mut collected);
        collected
    }

    fn collect_items<'a>(&'a self, collected: &mut Vec<&'a I>) {
        match self {
            QuadTree::Empty => {}
            QuadTree::Leaf { items, .. } => collected.extend(items.iter()),
            QuadTree::Node { children, .. } => {
                for child in children.iter() {
                    child.collect_items(collected);
                }
            }
        }
    }

    /// Checks the structural invariants of the tree.
    ///
    /// * every item lies inside the bounding box of every subtree containing it;
    /// * every child box lies inside its parent's box;
    /// * leaves are non-empty and below `policy.max_leaf_size`, unless their points coincide or
    ///   they sit at the depth cap.
    pub fn validate<F>(&self, to_point: F, policy: &SplitPolicy) -> Result<(), LayoutError>
    where
        F: Fn(&I) -> Point2D,
    {
        self.validate_at(&to_point, policy, 0)
    }

    fn validate_at<F>(&self, to_point: &F, policy: &SplitPolicy, depth: usize) -> Result<(), LayoutError>
    where
        F: Fn(&I) -> Point2D,
    {
        match self {
            QuadTree::Empty => Ok(()),
            QuadTree::Leaf { bounding_box, items, .. } => {
                if items.is_empty() {
                    return Err(LayoutError::EmptyLeaf);
                }
                for item in items {
                    let point = to_point(item);
                    if !bounding_box.contains(point) {
                        return Err(LayoutError::PointOutsideBounds { x: point.x, y: point.y, depth });
                    }
                }
                let capped = bounding_box.is_degenerate() || depth >= policy.max_depth;
                if items.len() >= policy.max_leaf_size && !capped {
                    return Err(LayoutError::LeafOverCapacity {
                        size: items.len(),
                        capacity: policy.max_leaf_size,
                        depth,
                    });
                }
                Ok(())
            }
            QuadTree::Node { bounding_box, children, .. } => {
                for child in children.iter() {
                    if let Some(child_box) = child.bounding_box() {
                        if !child_box.is_contained_in(bounding_box) {
                            return Err(LayoutError::ChildOutsideBounds { depth: depth + 1 });
                        }
                    }
                    child.validate_at(to_point, policy, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}
