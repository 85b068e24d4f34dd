use enki_engine::coords::{Rect, Vec2};

/// Offset of an item edge from the matching parent edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchorVal {
    /// Logical pixels in from the edge.
    Px(f32),
    /// Share of the parent extent on that axis, 0.0 through 1.0.
    Pct(f32),
}

impl AnchorVal {
    pub fn resolve(self, parent_len: f32) -> f32 {
        match self {
            AnchorVal::Px(px) => px,
            AnchorVal::Pct(fraction) => parent_len * fraction,
        }
    }
}

/// How an axis gets its length when the anchors on that axis leave it free.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SizeHint {
    /// The item's measured content size (default).
    #[default]
    Natural,
    /// Exact length in logical pixels.
    Px(f32),
    /// Share of the parent extent, 0.0 through 1.0.
    Pct(f32),
    /// The full parent extent; shorthand for `Pct(1.0)`.
    Fill,
}

impl SizeHint {
    pub fn resolve(self, parent_len: f32, natural: f32) -> f32 {
        match self {
            SizeHint::Natural => natural,
            SizeHint::Px(px) => px,
            SizeHint::Pct(fraction) => parent_len * fraction,
            SizeHint::Fill => parent_len,
        }
    }
}

/// Layout constraints attached to every node in the item tree: an optional
/// offset per edge plus a size hint per axis.
///
/// Anchoring both edges of an axis stretches the item between them and the
/// axis size hint is ignored. Anchoring one edge pins the item to it at the
/// hinted (or natural) length. With neither edge anchored the item sits at
/// the parent origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anchors {
    pub left: Option<AnchorVal>,
    pub top: Option<AnchorVal>,
    pub right: Option<AnchorVal>,
    pub bottom: Option<AnchorVal>,
    pub width: SizeHint,
    pub height: SizeHint,
}

impl Anchors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn left(mut self, v: AnchorVal) -> Self {
        self.left = Some(v);
        self
    }

    pub fn top(mut self, v: AnchorVal) -> Self {
        self.top = Some(v);
        self
    }

    pub fn right(mut self, v: AnchorVal) -> Self {
        self.right = Some(v);
        self
    }

    pub fn bottom(mut self, v: AnchorVal) -> Self {
        self.bottom = Some(v);
        self
    }

    pub fn width(mut self, v: SizeHint) -> Self {
        self.width = v;
        self
    }

    pub fn height(mut self, v: SizeHint) -> Self {
        self.height = v;
        self
    }

    /// Resolve this node's rect inside `parent`.
    ///
    /// `natural` is the item's measured size; it only matters on an axis
    /// whose hint is `SizeHint::Natural` and which is not stretched by a
    /// pair of anchors.
    pub fn compute_rect(&self, parent: Rect, natural: Vec2) -> Rect {
        let (dx, w) = solve_axis(self.left, self.right, self.width, parent.size.x, natural.x);
        let (dy, h) = solve_axis(self.top, self.bottom, self.height, parent.size.y, natural.y);
        Rect::new(parent.origin.x + dx, parent.origin.y + dy, w, h)
    }
}

/// One axis of the anchor model, reduced to an offset/length pair relative
/// to the parent's near edge.
fn solve_axis(
    near: Option<AnchorVal>,
    far: Option<AnchorVal>,
    hint: SizeHint,
    parent_len: f32,
    natural: f32,
) -> (f32, f32) {
    let len = if let (Some(near), Some(far)) = (near, far) {
        (parent_len - near.resolve(parent_len) - far.resolve(parent_len)).max(0.0)
    } else {
        hint.resolve(parent_len, natural)
    };

    // When both edges are anchored the near one decides the position.
    let offset = if let Some(near) = near {
        near.resolve(parent_len)
    } else if let Some(far) = far {
        parent_len - far.resolve(parent_len) - len
    } else {
        0.0
    };

    (offset, len)
}
